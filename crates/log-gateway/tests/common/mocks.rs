// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

//! Mock implementations of gateway components for testing

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use hyper::Request;
use log_gateway::{
    authorizer::DelegateVerifier,
    config::GatewayConfig,
    envelope::LogEnvelope,
    http_utils::{self, Body},
    log_processor::LogProcessor,
    publisher::{LogPublisher, PublishError},
};

/// Mock log processor that returns 200 OK for all requests
pub struct MockLogProcessor;

#[async_trait::async_trait]
impl LogProcessor for MockLogProcessor {
    async fn process_logs(
        &self,
        _config: Arc<GatewayConfig>,
        _req: Request<Body>,
    ) -> Result<hyper::Response<Body>, hyper::http::Error> {
        hyper::Response::builder()
            .status(200)
            .body(http_utils::full_body("{}"))
    }
}

/// Mock publisher that records batches, or fails like a broker outage
pub struct MockLogPublisher {
    pub published: Mutex<Vec<Vec<LogEnvelope>>>,
    pub fail: bool,
}

impl MockLogPublisher {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(MockLogPublisher {
            published: Mutex::new(Vec::new()),
            fail,
        })
    }

    #[allow(dead_code)]
    pub fn batches(&self) -> Vec<Vec<LogEnvelope>> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LogPublisher for MockLogPublisher {
    async fn publish(&self, envelopes: &[LogEnvelope]) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Delivery(rdkafka::error::KafkaError::Canceled));
        }
        self.published.lock().unwrap().push(envelopes.to_vec());
        Ok(())
    }
}

/// Mock delegate verifier backed by a fixed tenant set
pub struct MockDelegateVerifier {
    pub delegates: HashSet<String>,
}

#[async_trait::async_trait]
impl DelegateVerifier for MockDelegateVerifier {
    async fn is_delegate(&self, tenant_id: &str) -> bool {
        self.delegates.contains(tenant_id)
    }
}

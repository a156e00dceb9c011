// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

//! Helper functions for integration tests

use std::collections::HashSet;
use std::time::Duration;

use http_body_util::BodyExt;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use log_gateway::config::GatewayConfig;
use log_gateway::http_utils;
use tokio::time::timeout;

/// Gateway config pointing at a test port; no broker is contacted because the
/// tests plug in mock publishers.
pub fn create_test_config(port: u16) -> GatewayConfig {
    GatewayConfig {
        http_port: port,
        kafka_url: "127.0.0.1:9092".to_string(),
        kafka_topic: "logs".to_string(),
        region: "region-one".to_string(),
        max_content_length: 1024 * 1024,
        max_envelope_size: 1024 * 1024,
        publish_timeout_ms: 10_000,
        delegate_tenants: HashSet::from(["ops".to_string()]),
    }
}

/// Send an HTTP request over TCP and return the response
pub async fn send_tcp_request(
    port: u16,
    uri: &str,
    method: &str,
    tenant: Option<&str>,
    body: Option<Vec<u8>>,
) -> Result<Response<hyper::body::Incoming>, Box<dyn std::error::Error>> {
    let stream = timeout(
        Duration::from_secs(2),
        tokio::net::TcpStream::connect(format!("127.0.0.1:{}", port)),
    )
    .await??;

    let io = TokioIo::new(stream);
    let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

    tokio::spawn(async move {
        let _ = conn.await;
    });

    let mut request_builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json");
    if let Some(tenant) = tenant {
        request_builder = request_builder.header("X-Tenant-Id", tenant);
    }

    let response = if let Some(body_data) = body {
        let body_len = body_data.len();
        request_builder = request_builder.header("Content-Length", body_len.to_string());
        let request = request_builder.body(http_utils::full_body(body_data))?;
        timeout(Duration::from_secs(2), sender.send_request(request)).await??
    } else {
        let request = request_builder.body(http_utils::empty_body())?;
        timeout(Duration::from_secs(2), sender.send_request(request)).await??
    };

    Ok(response)
}

#[allow(dead_code)]
pub async fn read_body_string(
    response: Response<hyper::body::Incoming>,
) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

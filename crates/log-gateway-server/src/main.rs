// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, sync::Arc};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use log_gateway::{
    authorizer::{ConfigDelegateVerifier, TenantAuthorizer},
    config::GatewayConfig,
    gateway::LogGateway,
    log_processor::GatewayLogProcessor,
    publisher::KafkaLogPublisher,
};

#[tokio::main]
pub async fn main() {
    let log_level = env::var("LOGS_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,rdkafka=off,{}", log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Starting log ingestion gateway");

    let config = match GatewayConfig::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Error creating config on log gateway startup: {e}");
            return;
        }
    };

    let publisher = match KafkaLogPublisher::new(&config) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("Error creating Kafka producer on log gateway startup: {e}");
            return;
        }
    };

    let delegate_verifier = Arc::new(ConfigDelegateVerifier::new(config.delegate_tenants.clone()));
    let log_processor = Arc::new(GatewayLogProcessor {
        authorizer: TenantAuthorizer::new(delegate_verifier),
        publisher,
    });

    let gateway = LogGateway {
        config: Arc::clone(&config),
        log_processor,
    };

    if let Err(e) = gateway.start().await {
        error!("Error when starting the log gateway: {e:?}");
    }
}

// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::env;

const DEFAULT_HTTP_PORT: u16 = 5607;
const DEFAULT_KAFKA_TOPIC: &str = "logs";
// Raw payload and serialized envelope limits both default to 1 MiB.
const DEFAULT_MAX_CONTENT_LENGTH: usize = 1024 * 1024;
const DEFAULT_MAX_ENVELOPE_SIZE: usize = 1024 * 1024;
const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 10_000;

/// Process-wide gateway configuration, read once at startup and shared
/// read-only between requests.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub http_port: u16,
    /// Kafka bootstrap servers the publisher connects to.
    pub kafka_url: String,
    /// Destination topic for published envelope batches.
    pub kafka_topic: String,
    /// Region stamped into every envelope's metadata.
    pub region: String,
    pub max_content_length: usize,
    /// Per-envelope limit, enforced on the serialized form.
    pub max_envelope_size: usize,
    pub publish_timeout_ms: u64,
    /// Tenants allowed to submit logs on behalf of other tenants.
    pub delegate_tenants: HashSet<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<GatewayConfig, Box<dyn std::error::Error>> {
        let kafka_url = env::var("LOGS_KAFKA_URL")
            .map_err(|_| anyhow::anyhow!("LOGS_KAFKA_URL environment variable is not set"))?;

        let http_port: u16 = env::var("LOGS_HTTP_PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);
        let kafka_topic =
            env::var("LOGS_KAFKA_TOPIC").unwrap_or_else(|_| DEFAULT_KAFKA_TOPIC.to_string());
        let region = env::var("LOGS_REGION").unwrap_or_default();
        let max_content_length = env::var("LOGS_MAX_CONTENT_LENGTH")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONTENT_LENGTH);
        let max_envelope_size = env::var("LOGS_MAX_ENVELOPE_SIZE")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_ENVELOPE_SIZE);
        let publish_timeout_ms = env::var("LOGS_PUBLISH_TIMEOUT_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PUBLISH_TIMEOUT_MS);
        let delegate_tenants = env::var("LOGS_DELEGATE_TENANTS")
            .map(|val| Self::parse_delegate_tenants(&val))
            .unwrap_or_default();

        let config = GatewayConfig {
            http_port,
            kafka_url,
            kafka_topic,
            region,
            max_content_length,
            max_envelope_size,
            publish_timeout_ms,
            delegate_tenants,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP port must be greater than 0").into());
        }
        if self.kafka_url.trim().is_empty() {
            return Err(anyhow::anyhow!("LOGS_KAFKA_URL cannot be empty").into());
        }
        if self.kafka_topic.trim().is_empty() {
            return Err(anyhow::anyhow!("LOGS_KAFKA_TOPIC cannot be empty").into());
        }
        if self.max_content_length == 0 || self.max_envelope_size == 0 {
            return Err(anyhow::anyhow!("size limits must be greater than 0").into());
        }
        Ok(())
    }

    // Space-separated tenant ids are the standard; comma-separated lists are
    // accepted as well for compatibility with older deployments.
    fn parse_delegate_tenants(raw: &str) -> HashSet<String> {
        let normalized = raw.replace(',', " ");
        normalized
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

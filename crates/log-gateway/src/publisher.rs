// Copyright 2025-Present the log-gateway authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::envelope::LogEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("creating kafka producer failed: {0}")]
    Create(#[source] rdkafka::error::KafkaError),

    #[error("serializing envelope batch failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("kafka delivery failed: {0}")]
    Delivery(#[source] rdkafka::error::KafkaError),
}

/// Hand-off of validated envelopes to the broker. No partial success: either
/// the whole batch is accepted by the broker client or the call fails.
#[async_trait]
pub trait LogPublisher {
    async fn publish(&self, envelopes: &[LogEnvelope]) -> Result<(), PublishError>;
}

/// Publishes envelope batches to a Kafka topic through a shared long-lived
/// producer. The producer tolerates concurrent use; no per-request locking.
pub struct KafkaLogPublisher {
    producer: FutureProducer,
    topic: String,
    delivery_timeout: Duration,
}

impl KafkaLogPublisher {
    pub fn new(config: &GatewayConfig) -> Result<Self, PublishError> {
        let producer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka_url)
            .set("message.timeout.ms", config.publish_timeout_ms.to_string())
            .create()
            .map_err(PublishError::Create)?;
        Ok(KafkaLogPublisher {
            producer,
            topic: config.kafka_topic.clone(),
            delivery_timeout: Duration::from_millis(config.publish_timeout_ms),
        })
    }
}

#[async_trait]
impl LogPublisher for KafkaLogPublisher {
    async fn publish(&self, envelopes: &[LogEnvelope]) -> Result<(), PublishError> {
        if envelopes.is_empty() {
            return Ok(());
        }

        // The whole batch travels as one JSON-array payload, no partition key.
        let payload = serde_json::to_vec(envelopes)?;
        let record = FutureRecord::<(), _>::to(&self.topic).payload(&payload);

        if let Err((err, _record)) = self
            .producer
            .send(record, Timeout::After(self.delivery_timeout))
            .await
        {
            return Err(PublishError::Delivery(err));
        }
        debug!(
            "Produced {} envelopes to topic {}",
            envelopes.len(),
            self.topic
        );
        Ok(())
    }
}

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::message::Message;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Failed to deserialize message: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Message has no payload")]
    NoPayload,
}

/// Kafka consumer for the new-orders topic. Joins a consumer group, starts
/// from the earliest unread offset, and lets the broker auto-commit; delivery
/// guarantees across restarts are the broker's concern.
pub struct EventConsumer {
    consumer: BaseConsumer,
}

impl EventConsumer {
    pub fn new(brokers: &str, group_id: &str, topics: &[&str]) -> Result<Self, ConsumerError> {
        let consumer: BaseConsumer = ClientConfig::new()
            .set("group.id", group_id)
            .set("bootstrap.servers", brokers)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "30000")
            .create()?;

        consumer.subscribe(topics)?;

        info!(
            "Kafka consumer created with group_id: {}, topics: {:?}",
            group_id, topics
        );
        Ok(Self { consumer })
    }

    /// Poll for one raw message, returning `None` when the timeout elapses.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Vec<u8>>, ConsumerError> {
        match self.consumer.poll(Some(timeout)) {
            Some(Ok(message)) => {
                debug!(
                    "Received message from {}, partition {}, offset {}",
                    message.topic(),
                    message.partition(),
                    message.offset()
                );

                match message.payload() {
                    Some(payload) => Ok(Some(payload.to_vec())),
                    None => {
                        warn!("Message has no payload");
                        Err(ConsumerError::NoPayload)
                    }
                }
            }
            Some(Err(e)) => Err(ConsumerError::Kafka(e)),
            None => Ok(None),
        }
    }

    /// Poll and deserialize one message.
    pub fn poll_message<T: DeserializeOwned>(
        &self,
        timeout: Duration,
    ) -> Result<Option<T>, ConsumerError> {
        match self.poll(timeout)? {
            Some(payload) => Ok(Some(serde_json::from_slice(&payload)?)),
            None => Ok(None),
        }
    }
}

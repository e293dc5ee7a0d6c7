use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use domain::NewOrderEvent;

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Failed to create Kafka producer: {0}")]
    ProducerCreation(String),

    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to publish event: {0}")]
    PublishFailed(String),
}

/// Hand-off point for the order-created event. The coordinator awaits the
/// acknowledgment, but a failure never undoes the store write that triggered
/// the publish.
#[async_trait]
pub trait NewOrderPublisher: Send + Sync {
    async fn publish(&self, event: &NewOrderEvent) -> Result<(), PublisherError>;
}

/// Kafka publisher appending one JSON message per created order, keyed by
/// order id.
pub struct KafkaNewOrderPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaNewOrderPublisher {
    pub fn new(brokers: &str, topic: String) -> Result<Self, PublisherError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .create()
            .map_err(|e| PublisherError::ProducerCreation(e.to_string()))?;

        info!("Kafka producer created for topic: {}", topic);
        Ok(Self { producer, topic })
    }
}

#[async_trait]
impl NewOrderPublisher for KafkaNewOrderPublisher {
    async fn publish(&self, event: &NewOrderEvent) -> Result<(), PublisherError> {
        let payload = serde_json::to_string(event)?;
        let key = event.order_id.to_string();

        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(5)))
            .await
        {
            Ok((partition, offset)) => {
                debug!(
                    "Published new-order event for {} to partition {}, offset {}",
                    event.order_id, partition, offset
                );
                Ok(())
            }
            Err((err, _)) => {
                warn!(
                    "Failed to publish new-order event for {}: {}",
                    event.order_id, err
                );
                Err(PublisherError::PublishFailed(err.to_string()))
            }
        }
    }
}

pub mod consumer;
pub mod jobs;
pub mod producer;

pub use consumer::{ConsumerError, EventConsumer};
pub use jobs::{JobQueue, JobQueueError, ProcessOrderJob, RedisJobQueue};
pub use producer::{KafkaNewOrderPublisher, NewOrderPublisher, PublisherError};

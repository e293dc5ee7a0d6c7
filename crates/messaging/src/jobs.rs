use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JobQueueError {
    #[error("Failed to connect to Redis: {0}")]
    Connection(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to serialize job: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Deferred unit of work: "process this order". The body is opaque to the
/// queue; the worker's processor decides what processing means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOrderJob {
    pub order_id: Uuid,
}

/// FIFO queue for deferred order-processing jobs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: ProcessOrderJob) -> Result<(), JobQueueError>;

    /// Block up to `timeout_seconds` waiting for a job; `None` on timeout.
    async fn dequeue(&self, timeout_seconds: usize)
        -> Result<Option<ProcessOrderJob>, JobQueueError>;
}

const QUEUE_KEY: &str = "jobs:process-order";

/// Redis list-backed job queue: LPUSH to enqueue, BRPOP to dequeue.
pub struct RedisJobQueue {
    conn: ConnectionManager,
}

impl RedisJobQueue {
    pub async fn new(redis_url: &str) -> Result<Self, JobQueueError> {
        let client =
            redis::Client::open(redis_url).map_err(|e| JobQueueError::Connection(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| JobQueueError::Connection(e.to_string()))?;

        info!("Job queue connected (key: {})", QUEUE_KEY);
        Ok(Self { conn })
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn enqueue(&self, job: ProcessOrderJob) -> Result<(), JobQueueError> {
        let payload = serde_json::to_string(&job)?;
        let _: () = self.conn.clone().lpush(QUEUE_KEY, payload).await?;

        debug!("Enqueued process-order job for {}", job.order_id);
        Ok(())
    }

    async fn dequeue(
        &self,
        timeout_seconds: usize,
    ) -> Result<Option<ProcessOrderJob>, JobQueueError> {
        let popped: Option<(String, String)> =
            self.conn.clone().brpop(QUEUE_KEY, timeout_seconds as f64).await?;

        match popped {
            Some((_, payload)) => {
                let job: ProcessOrderJob = serde_json::from_str(&payload)?;
                debug!("Dequeued process-order job for {}", job.order_id);
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }
}

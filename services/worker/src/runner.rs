use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use common::metrics;
use messaging::JobQueue;

/// Pluggable handler for deferred order-processing jobs. The queue only
/// carries the order id; what "processing" means is up to the
/// implementation.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn process(&self, order_id: Uuid) -> anyhow::Result<()>;
}

/// Stand-in processor: waits out a fixed delay and reports completion.
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl OrderProcessor for SimulatedProcessor {
    async fn process(&self, order_id: Uuid) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        info!("Order {} processed", order_id);
        Ok(())
    }
}

/// Drains the job queue into the processor, one job at a time. A failing
/// job is logged and dropped; retry semantics belong to the broker side of
/// the pipeline, not here.
pub struct JobRunner {
    queue: Arc<dyn JobQueue>,
    processor: Arc<dyn OrderProcessor>,
}

impl JobRunner {
    pub fn new(queue: Arc<dyn JobQueue>, processor: Arc<dyn OrderProcessor>) -> Self {
        Self { queue, processor }
    }

    /// Dequeue and process at most one job. Returns whether a job was seen.
    pub async fn run_once(&self, timeout_seconds: usize) -> anyhow::Result<bool> {
        match self.queue.dequeue(timeout_seconds).await? {
            Some(job) => {
                if let Err(e) = self.processor.process(job.order_id).await {
                    error!("Processing order {} failed: {}", job.order_id, e);
                } else {
                    metrics::JOBS_PROCESSED.inc();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Process jobs until the task is aborted.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.run_once(1).await {
                error!("Job queue error: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use messaging::{JobQueueError, ProcessOrderJob};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryQueue {
        jobs: Mutex<VecDeque<ProcessOrderJob>>,
    }

    #[async_trait]
    impl JobQueue for InMemoryQueue {
        async fn enqueue(&self, job: ProcessOrderJob) -> Result<(), JobQueueError> {
            self.jobs.lock().unwrap().push_back(job);
            Ok(())
        }

        async fn dequeue(
            &self,
            _timeout_seconds: usize,
        ) -> Result<Option<ProcessOrderJob>, JobQueueError> {
            Ok(self.jobs.lock().unwrap().pop_front())
        }
    }

    #[derive(Default)]
    struct CountingProcessor {
        processed: AtomicUsize,
        seen: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl OrderProcessor for CountingProcessor {
        async fn process(&self, order_id: Uuid) -> anyhow::Result<()> {
            self.processed.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(order_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_runner_drains_queue_in_order() {
        let queue = Arc::new(InMemoryQueue::default());
        let processor = Arc::new(CountingProcessor::default());
        let runner = JobRunner::new(queue.clone(), processor.clone());

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        queue
            .enqueue(ProcessOrderJob { order_id: first })
            .await
            .unwrap();
        queue
            .enqueue(ProcessOrderJob { order_id: second })
            .await
            .unwrap();

        assert!(runner.run_once(0).await.unwrap());
        assert!(runner.run_once(0).await.unwrap());
        assert!(!runner.run_once(0).await.unwrap());

        assert_eq!(processor.processed.load(Ordering::SeqCst), 2);
        assert_eq!(*processor.seen.lock().unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_failing_job_is_dropped_not_fatal() {
        struct FailingProcessor;

        #[async_trait]
        impl OrderProcessor for FailingProcessor {
            async fn process(&self, _order_id: Uuid) -> anyhow::Result<()> {
                anyhow::bail!("simulated failure")
            }
        }

        let queue = Arc::new(InMemoryQueue::default());
        let runner = JobRunner::new(queue.clone(), Arc::new(FailingProcessor));

        queue
            .enqueue(ProcessOrderJob {
                order_id: Uuid::new_v4(),
            })
            .await
            .unwrap();

        // The failure is swallowed; the runner keeps going.
        assert!(runner.run_once(0).await.unwrap());
        assert!(!runner.run_once(0).await.unwrap());
    }

    #[tokio::test]
    async fn test_simulated_processor_completes() {
        let processor = SimulatedProcessor::new(Duration::from_millis(1));
        assert!(processor.process(Uuid::new_v4()).await.is_ok());
    }
}

use anyhow::Result;
use futures_util::stream::StreamExt;
use signal_hook::consts::signal::*;
use signal_hook_tokio::Signals;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use common::telemetry::{init_telemetry, TelemetryConfig};
use domain::NewOrderEvent;
use messaging::{EventConsumer, JobQueue, ProcessOrderJob, RedisJobQueue};

mod runner;
use runner::{JobRunner, OrderProcessor, SimulatedProcessor};

const PROCESSING_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = common::AppConfig::from_env();

    init_telemetry(&TelemetryConfig {
        service_name: "worker".to_string(),
        log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        json_output: false,
    });

    info!("Starting order worker...");
    info!("  Kafka brokers: {}", config.kafka_brokers);
    info!("  Topic: {}", config.kafka_topic);
    info!("  Consumer group: {}", config.consumer_group);

    let queue = Arc::new(RedisJobQueue::new(&config.redis_url).await?) as Arc<dyn JobQueue>;

    let consumer = EventConsumer::new(
        &config.kafka_brokers,
        &config.consumer_group,
        &[&config.kafka_topic],
    )?;

    // Job runner drains the queue concurrently with event consumption.
    let processor = Arc::new(SimulatedProcessor::new(PROCESSING_DELAY)) as Arc<dyn OrderProcessor>;
    let job_runner = JobRunner::new(queue.clone(), processor);
    let runner_task = tokio::spawn(async move { job_runner.run().await });

    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();
    let signal_task = tokio::spawn(async move {
        while let Some(signal) = signals.next().await {
            if matches!(signal, SIGTERM | SIGINT) {
                info!("Received shutdown signal");
                break;
            }
        }
    });

    info!("Consuming new-order events...");

    loop {
        if signal_task.is_finished() {
            break;
        }

        match consumer.poll_message::<NewOrderEvent>(Duration::from_millis(100)) {
            Ok(Some(event)) => {
                info!("New order event: {}", event.order_id);
                if let Err(e) = queue
                    .enqueue(ProcessOrderJob {
                        order_id: event.order_id,
                    })
                    .await
                {
                    error!("Failed to enqueue job for {}: {}", event.order_id, e);
                }
            }
            Ok(None) => {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            Err(e) => {
                error!("Error consuming events: {}", e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    info!("Shutting down worker...");
    runner_task.abort();
    handle.close();
    info!("Worker stopped");

    Ok(())
}

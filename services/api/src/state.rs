use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use cache::{OrderCache, RedisOrderCache};
use common::AppConfig;
use coordinator::{AuthService, OrderCoordinator};
use messaging::{KafkaNewOrderPublisher, NewOrderPublisher};
use store::{OrderStore, PgOrderStore, PgUserStore, UserStore};

/// Application state shared across handlers. All collaborators are
/// explicitly constructed here and injected; nothing is process-global.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderCoordinator>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        info!("Connecting to database...");
        let pool = PgPool::connect(&config.database_url).await?;

        let order_store = Arc::new(PgOrderStore::new(pool.clone())) as Arc<dyn OrderStore>;
        let user_store = Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>;

        info!("Connecting to Redis...");
        let order_cache = Arc::new(
            RedisOrderCache::new(&config.redis_url, config.cache_ttl_seconds).await?,
        ) as Arc<dyn OrderCache>;

        info!("Creating Kafka publisher...");
        let publisher = Arc::new(KafkaNewOrderPublisher::new(
            &config.kafka_brokers,
            config.kafka_topic.clone(),
        )?) as Arc<dyn NewOrderPublisher>;

        let orders = Arc::new(OrderCoordinator::new(order_store, order_cache, publisher));
        let auth = Arc::new(AuthService::new(user_store, config.jwt_secret.clone()));

        Ok(Self { orders, auth })
    }
}

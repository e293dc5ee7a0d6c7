use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, error, warn};
use uuid::Uuid;

use domain::Order;

use crate::{CacheError, OrderCache};

/// Default staleness bound for cached orders.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

// Keys are namespaced per entity type so order entries cannot collide with
// anything else sharing the Redis instance.
fn order_key(order_id: Uuid) -> String {
    format!("order:{}", order_id)
}

/// Redis-backed order cache over a connection manager.
pub struct RedisOrderCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisOrderCache {
    pub async fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        debug!("Order cache initialized with TTL: {}s", ttl_seconds);
        Ok(Self { conn, ttl_seconds })
    }
}

#[async_trait]
impl OrderCache for RedisOrderCache {
    async fn get(&self, order_id: Uuid) -> Option<Order> {
        let key = order_key(order_id);

        match self.conn.clone().get::<_, Option<String>>(&key).await {
            Ok(Some(value)) => match serde_json::from_str::<Order>(&value) {
                Ok(order) => Some(order),
                Err(e) => {
                    error!("Failed to deserialize cached order {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Redis error reading {}: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, order: &Order) {
        let key = order_key(order.id);

        let json = match serde_json::to_string(order) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize order for {}: {}", key, e);
                return;
            }
        };

        let result: Result<(), RedisError> =
            self.conn.clone().set_ex(&key, json, self.ttl_seconds).await;

        if let Err(e) = result {
            warn!("Failed to cache {}: {}", key, e);
        }
    }

    async fn delete(&self, order_id: Uuid) {
        let key = order_key(order_id);

        let result: Result<(), RedisError> = self.conn.clone().del(&key).await;
        if let Err(e) = result {
            warn!("Failed to delete cache entry {}: {}", key, e);
        }
    }
}

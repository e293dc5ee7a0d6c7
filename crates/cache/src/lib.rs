pub mod redis_cache;

pub use redis_cache::RedisOrderCache;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use domain::Order;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to connect to Redis: {0}")]
    Connection(String),
}

/// Ephemeral key -> serialized-order mapping with a TTL.
///
/// The TTL is an advisory staleness bound, not a correctness guarantee, and
/// no read-modify-write atomicity exists across calls; all consistency comes
/// from the coordinator's invalidate-then-repopulate discipline. Every
/// operation is best-effort: implementations log failures and degrade to
/// misses rather than surfacing errors to the caller.
#[async_trait]
pub trait OrderCache: Send + Sync {
    /// Fetch a cached order, or `None` on miss, expiry, or cache failure.
    async fn get(&self, order_id: Uuid) -> Option<Order>;

    /// Write the order under its id with the configured TTL.
    async fn set(&self, order: &Order);

    /// Drop the entry for an order id, if present.
    async fn delete(&self, order_id: Uuid);
}

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use cache::OrderCache;
use common::metrics;
use domain::{CreateOrderRequest, NewOrderEvent, Order, OrderItem, OrderStatus};
use messaging::NewOrderPublisher;
use store::OrderStore;

use crate::CoordinatorError;

/// Orchestrates the authoritative store, the order cache, and the new-order
/// publisher. Holds no in-process locks: per-row atomicity at the store and
/// per-key atomicity at the cache are the only ordering guarantees.
pub struct OrderCoordinator {
    store: Arc<dyn OrderStore>,
    cache: Arc<dyn OrderCache>,
    publisher: Arc<dyn NewOrderPublisher>,
}

impl OrderCoordinator {
    pub fn new(
        store: Arc<dyn OrderStore>,
        cache: Arc<dyn OrderCache>,
        publisher: Arc<dyn NewOrderPublisher>,
    ) -> Self {
        Self {
            store,
            cache,
            publisher,
        }
    }

    /// Create an order for `user_id` with status PENDING and a freshly
    /// generated id, commit it to the store, then fire the new-order event
    /// and warm the cache. Publish and cache-write are best-effort: their
    /// failure is logged and counted, never surfaced, and the committed
    /// order is never rolled back.
    ///
    /// The caller is trusted to pass an authenticated, existing user id.
    pub async fn create_order(
        &self,
        user_id: i64,
        request: CreateOrderRequest,
    ) -> Result<Order, CoordinatorError> {
        request.validate()?;

        let items: Vec<OrderItem> = request
            .items
            .iter()
            .map(|i| OrderItem::new(i.product_id, i.quantity, i.price))
            .collect();

        let order = Order::new(user_id, items, request.total_price);
        let order = self.store.insert(&order).await?;
        metrics::ORDERS_CREATED.inc();
        info!("Order created: {} for user {}", order.id, user_id);

        if let Err(e) = self.publisher.publish(&NewOrderEvent::from(&order)).await {
            warn!("New-order event for {} not published: {}", order.id, e);
            metrics::EVENT_PUBLISH_FAILURES.inc();
        }

        self.cache.set(&order).await;

        Ok(order)
    }

    /// Cache-aside read: a cache hit returns without touching the store; a
    /// miss reads the store and repopulates the cache before returning.
    pub async fn get_order(&self, order_id: Uuid) -> Result<Order, CoordinatorError> {
        if let Some(order) = self.cache.get(order_id).await {
            metrics::record_cache_hit();
            return Ok(order);
        }
        metrics::record_cache_miss();

        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(CoordinatorError::OrderNotFound(order_id))?;

        self.cache.set(&order).await;
        Ok(order)
    }

    /// Conditional status update at the store, then invalidate and
    /// repopulate the cache entry with the updated row.
    ///
    /// Known race, accepted: between the delete and the set, a concurrent
    /// cache-miss reader can re-cache the pre-update row it read before our
    /// store commit. Convergence holds once this call returns (bounded by
    /// one extra read cycle plus TTL); callers must not assume consistency
    /// mid-call.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, CoordinatorError> {
        let order = self
            .store
            .update_status(order_id, status)
            .await?
            .ok_or(CoordinatorError::OrderNotFound(order_id))?;

        self.cache.delete(order_id).await;
        self.cache.set(&order).await;

        info!("Order {} status set to {}", order.id, status.as_str());
        Ok(order)
    }

    /// List queries are never cached; every call consults the store. A user
    /// with zero orders gets an empty list, not an error.
    pub async fn list_orders(&self, user_id: i64) -> Result<Vec<Order>, CoordinatorError> {
        Ok(self.store.list_by_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain::OrderItemRequest;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use store::StoreError;

    #[derive(Default)]
    struct FakeStore {
        orders: Mutex<HashMap<Uuid, Order>>,
        get_calls: AtomicUsize,
    }

    impl FakeStore {
        fn get_call_count(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderStore for FakeStore {
        async fn insert(&self, order: &Order) -> Result<Order, StoreError> {
            self.orders
                .lock()
                .unwrap()
                .insert(order.id, order.clone());
            Ok(order.clone())
        }

        async fn get(&self, order_id: Uuid) -> Result<Option<Order>, StoreError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.orders.lock().unwrap().get(&order_id).cloned())
        }

        async fn update_status(
            &self,
            order_id: Uuid,
            status: OrderStatus,
        ) -> Result<Option<Order>, StoreError> {
            let mut orders = self.orders.lock().unwrap();
            match orders.get_mut(&order_id) {
                Some(order) => {
                    order.status = status;
                    Ok(Some(order.clone()))
                }
                None => Ok(None),
            }
        }

        async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError> {
            let mut orders: Vec<Order> = self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect();
            orders.sort_by_key(|o| o.created_at);
            Ok(orders)
        }
    }

    #[derive(Default)]
    struct FakeCache {
        entries: Mutex<HashMap<Uuid, Order>>,
    }

    impl FakeCache {
        fn peek(&self, order_id: Uuid) -> Option<Order> {
            self.entries.lock().unwrap().get(&order_id).cloned()
        }
    }

    #[async_trait]
    impl OrderCache for FakeCache {
        async fn get(&self, order_id: Uuid) -> Option<Order> {
            self.entries.lock().unwrap().get(&order_id).cloned()
        }

        async fn set(&self, order: &Order) {
            self.entries
                .lock()
                .unwrap()
                .insert(order.id, order.clone());
        }

        async fn delete(&self, order_id: Uuid) {
            self.entries.lock().unwrap().remove(&order_id);
        }
    }

    #[derive(Default)]
    struct FakePublisher {
        events: Mutex<Vec<NewOrderEvent>>,
        fail: bool,
    }

    impl FakePublisher {
        fn failing() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn published(&self) -> Vec<NewOrderEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewOrderPublisher for FakePublisher {
        async fn publish(&self, event: &NewOrderEvent) -> Result<(), messaging::PublisherError> {
            if self.fail {
                return Err(messaging::PublisherError::PublishFailed(
                    "broker unreachable".to_string(),
                ));
            }
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct Harness {
        store: Arc<FakeStore>,
        cache: Arc<FakeCache>,
        publisher: Arc<FakePublisher>,
        coordinator: OrderCoordinator,
    }

    fn harness() -> Harness {
        harness_with_publisher(FakePublisher::default())
    }

    fn harness_with_publisher(publisher: FakePublisher) -> Harness {
        let store = Arc::new(FakeStore::default());
        let cache = Arc::new(FakeCache::default());
        let publisher = Arc::new(publisher);
        let coordinator = OrderCoordinator::new(
            store.clone(),
            cache.clone(),
            publisher.clone(),
        );
        Harness {
            store,
            cache,
            publisher,
            coordinator,
        }
    }

    fn create_request() -> CreateOrderRequest {
        CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    product_id: 1,
                    quantity: 2,
                    price: 10.0,
                },
                OrderItemRequest {
                    product_id: 2,
                    quantity: 1,
                    price: 5.0,
                },
            ],
            total_price: 25.0,
        }
    }

    #[tokio::test]
    async fn test_create_order_is_pending_with_fresh_id() {
        let h = harness();

        let first = h.coordinator.create_order(1, create_request()).await.unwrap();
        let second = h.coordinator.create_order(1, create_request()).await.unwrap();

        assert_eq!(first.status, OrderStatus::Pending);
        assert_ne!(first.id, second.id);
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total_price, 25.0);
    }

    #[tokio::test]
    async fn test_create_order_publishes_event() {
        let h = harness();

        let order = h.coordinator.create_order(7, create_request()).await.unwrap();

        let events = h.publisher.published();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].order_id, order.id);
        assert_eq!(events[0].user_id, 7);
        assert_eq!(events[0].total_price, 25.0);
        assert_eq!(events[0].status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_order_survives_publish_failure() {
        let h = harness_with_publisher(FakePublisher::failing());

        let order = h.coordinator.create_order(1, create_request()).await.unwrap();

        // The committed order is intact and the cache was still warmed.
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(h.cache.peek(order.id).is_some());
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty_items() {
        let h = harness();
        let request = CreateOrderRequest {
            items: vec![],
            total_price: 0.0,
        };

        let result = h.coordinator.create_order(1, request).await;
        assert!(matches!(result, Err(CoordinatorError::Validation(_))));
        assert!(h.publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_get_after_create_never_reads_store() {
        let h = harness();

        let created = h.coordinator.create_order(1, create_request()).await.unwrap();
        let fetched = h.coordinator.get_order(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(h.store.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_miss_reads_store_and_repopulates_cache() {
        let h = harness();

        // Row exists in the store but not in the cache.
        let order = Order::new(1, vec![OrderItem::new(1, 1, 10.0)], 10.0);
        h.store.insert(&order).await.unwrap();

        let fetched = h.coordinator.get_order(order.id).await.unwrap();
        assert_eq!(fetched, order);
        assert_eq!(h.store.get_call_count(), 1);

        // Second read is served from the repopulated cache.
        let again = h.coordinator.get_order(order.id).await.unwrap();
        assert_eq!(again, order);
        assert_eq!(h.store.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_order_is_not_found() {
        let h = harness();
        let unknown = Uuid::new_v4();

        let result = h.coordinator.get_order(unknown).await;
        assert!(matches!(
            result,
            Err(CoordinatorError::OrderNotFound(id)) if id == unknown
        ));
    }

    #[tokio::test]
    async fn test_update_status_reflected_by_next_get() {
        let h = harness();

        let created = h.coordinator.create_order(1, create_request()).await.unwrap();
        let updated = h
            .coordinator
            .update_status(created.id, OrderStatus::Paid)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);

        let fetched = h.coordinator.get_order(created.id).await.unwrap();
        assert_eq!(fetched.status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_status_repopulates_cache_entry() {
        let h = harness();

        let created = h.coordinator.create_order(1, create_request()).await.unwrap();
        h.coordinator
            .update_status(created.id, OrderStatus::Canceled)
            .await
            .unwrap();

        // The entry was repopulated with the new state, not just dropped.
        let cached = h.cache.peek(created.id).expect("cache entry present");
        assert_eq!(cached.status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let h = harness();
        let unknown = Uuid::new_v4();

        let result = h.coordinator.update_status(unknown, OrderStatus::Paid).await;
        assert!(matches!(
            result,
            Err(CoordinatorError::OrderNotFound(id)) if id == unknown
        ));
    }

    #[tokio::test]
    async fn test_list_orders_returns_all_for_user() {
        let h = harness();

        for _ in 0..3 {
            h.coordinator.create_order(1, create_request()).await.unwrap();
        }
        h.coordinator.create_order(2, create_request()).await.unwrap();

        let orders = h.coordinator.list_orders(1).await.unwrap();
        assert_eq!(orders.len(), 3);
        assert!(orders.iter().all(|o| o.user_id == 1));
    }

    #[tokio::test]
    async fn test_list_orders_empty_for_user_without_orders() {
        let h = harness();

        let orders = h.coordinator.list_orders(99).await.unwrap();
        assert!(orders.is_empty());
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::{Order, OrderItem, OrderStatus};

/// Event emitted once per created order, after the store write has committed.
/// Delivery is fire-and-forget from the creator's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderEvent {
    pub order_id: Uuid,
    pub user_id: i64,
    pub total_price: f64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl From<&Order> for NewOrderEvent {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            total_price: order.total_price,
            status: order.status,
            items: order.items.clone(),
        }
    }
}

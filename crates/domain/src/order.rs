use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Lifecycle states of an order. PENDING is the entry state; no transition
/// graph is enforced between the others (any status may be written over any
/// other via an update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "CANCELED" => Ok(OrderStatus::Canceled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A line item on an order. Not validated against a product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    pub fn new(product_id: i64, quantity: u32, price: f64) -> Self {
        Self {
            product_id,
            quantity,
            price,
        }
    }
}

/// An order as persisted in the store and served from the cache.
///
/// `total_price` is supplied by the client at creation and is deliberately
/// not derived from the items (carried over from the original design).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a new PENDING order with a freshly generated id. The id is never
    /// client-supplied.
    pub fn new(user_id: i64, items: Vec<OrderItem>, total_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            items,
            total_price,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

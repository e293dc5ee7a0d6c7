use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::OrderStatus;

/// Request to create an order for the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must have at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,

    #[validate(range(min = 0.0, message = "Total price must not be negative"))]
    pub total_price: f64,
}

/// Line item in a create-order request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Request to overwrite an order's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Typed login payload (email + password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

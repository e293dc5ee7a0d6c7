pub mod event;
pub mod order;
pub mod requests;
pub mod user;

pub use event::NewOrderEvent;
pub use order::{Order, OrderItem, OrderStatus};
pub use requests::{
    CreateOrderRequest, LoginRequest, OrderItemRequest, RegisterRequest, UpdateOrderStatusRequest,
};
pub use user::User;

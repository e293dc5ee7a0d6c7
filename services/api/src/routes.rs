use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::auth::require_auth;
use crate::handlers::{create_order, get_order, health, list_orders, login, register, update_status};
use crate::state::AppState;

/// Build the application router. Order routes sit behind the bearer-token
/// middleware; registration, login, and health do not.
pub fn build_router(state: AppState) -> Router {
    let orders = Router::new()
        .route("/api/v1/orders", post(create_order::handle))
        .route("/api/v1/orders/:id", get(get_order::handle))
        .route("/api/v1/orders/:id/status", patch(update_status::handle))
        .route("/api/v1/users/:id/orders", get(list_orders::handle))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/register", post(register::handle))
        .route("/token", post(login::handle))
        .merge(orders)
        .with_state(state)
}

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use domain::{CreateOrderRequest, Order};

use crate::auth::CurrentUser;
use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Create an order owned by the authenticated user.
pub async fn handle(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), (StatusCode, Json<ErrorResponse>)> {
    info!("Create order request from user {}", user.id);

    let order = state
        .orders
        .create_order(user.id, request)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(order)))
}

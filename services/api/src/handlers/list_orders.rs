use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain::Order;

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// List a user's orders. Store-only; never cached. A user with no orders
/// gets an empty array.
pub async fn handle(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Order>>, (StatusCode, Json<ErrorResponse>)> {
    let orders = state
        .orders
        .list_orders(user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(orders))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use domain::Order;

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Fetch one order by id (cache-aside behind the coordinator).
pub async fn handle(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
    let order = state
        .orders
        .get_order(order_id)
        .await
        .map_err(error_response)?;

    Ok(Json(order))
}

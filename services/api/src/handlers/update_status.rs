use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::{Order, UpdateOrderStatusRequest};

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Overwrite an order's status. 404 when the id matches no row.
pub async fn handle(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Status update for order {}: {}",
        order_id,
        request.status.as_str()
    );

    let order = state
        .orders
        .update_status(order_id, request.status)
        .await
        .map_err(error_response)?;

    Ok(Json(order))
}

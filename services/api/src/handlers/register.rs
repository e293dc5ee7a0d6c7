use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use domain::RegisterRequest;

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Register a new user. Duplicate email yields 409.
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<ErrorResponse>)> {
    let user = state
        .auth
        .register(request)
        .await
        .map_err(error_response)?;

    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }),
    ))
}

use axum::{extract::State, http::StatusCode, Json};

use coordinator::AccessToken;
use domain::LoginRequest;

use crate::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

/// Exchange email + password for a bearer token.
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccessToken>, (StatusCode, Json<ErrorResponse>)> {
    let token = state.auth.login(request).await.map_err(error_response)?;
    Ok(Json(token))
}

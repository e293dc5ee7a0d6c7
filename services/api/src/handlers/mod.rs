pub mod create_order;
pub mod get_order;
pub mod health;
pub mod list_orders;
pub mod login;
pub mod register;
pub mod update_status;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use coordinator::CoordinatorError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a coordinator error onto the HTTP surface. Store failures are the
/// only 5xx; everything else is the caller's problem.
pub fn error_response(err: CoordinatorError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        CoordinatorError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        CoordinatorError::Validation(_) => StatusCode::BAD_REQUEST,
        CoordinatorError::EmailTaken => StatusCode::CONFLICT,
        CoordinatorError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        CoordinatorError::Store(_) | CoordinatorError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

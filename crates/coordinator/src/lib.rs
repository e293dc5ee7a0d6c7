pub mod auth;
pub mod orders;

pub use auth::{AccessToken, AuthService};
pub use orders::OrderCoordinator;

use thiserror::Error;
use uuid::Uuid;

use store::StoreError;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoordinatorError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoordinatorError::Validation(errors.to_string())
    }
}

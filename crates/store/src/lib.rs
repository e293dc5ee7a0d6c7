pub mod orders;
pub mod users;

pub use orders::{OrderStore, PgOrderStore};
pub use users::{PgUserStore, UserStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. The password is stored only as an opaque hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

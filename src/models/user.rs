use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Demo-local account record. Stored plaintext-serialized under its own key;
/// only the saved-trips blob is encrypted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub name: String,
    pub password: String, // Always hashed
    pub created_at: DateTime<Utc>,
}

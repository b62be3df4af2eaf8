//! Authentication-related models

use serde::{Deserialize, Serialize};

/// Signup / signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub msg: String,
    pub token: String,
}

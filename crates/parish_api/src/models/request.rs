//! HTTP request type definitions

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Body of `POST /api/admin/auth/login`.
///
/// ```json
/// { "password": "..." }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Shared admin password
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("password", &"<REDACTED>")
            .finish()
    }
}

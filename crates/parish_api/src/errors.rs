//! Error handling and HTTP error conversion
//!
//! This module defines how domain errors are translated to HTTP error
//! responses.
//!
//! # Architecture
//!
//! Errors from `settings_store` and `auth_handler` are converted to HTTP
//! responses with appropriate status codes at the HTTP boundary:
//!
//! | Domain error | Status | Code |
//! |---|---|---|
//! | `AuthError::*` | 401 | `AuthError` |
//! | `SettingsError::Validation`, malformed body | 400 | `ValidationError` |
//! | `SettingsError::NotFound` | 404 | `NotFoundError` |
//! | `SettingsError::Persistence` | 500 | `PersistenceError` |
//! | unrouted path | 404 | `NotFoundError` |
//! | unsupported method | 405 | `MethodNotAllowedError` |
//! | request timeout | 408 | `TimeoutError` |

use auth_handler::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use settings_store::{SchemaError, SettingsError};

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
///
/// ```json
/// {
///   "error": "Required section missing: features",
///   "code": "ValidationError",
///   "details": { "kind": "MissingSection", "path": "features" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Machine-readable error code
    pub code: String,

    /// Additional context (optional, shape varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error returned from handlers and middleware.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<ConfigurationDocument>, ApiError> {
///     let document = state.settings.current().await?; // SettingsError -> ApiError
///     Ok(Json(document))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach details to the error body
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create an authentication error (401)
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "AuthError", message)
    }

    /// Create a validation error (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationError", message)
    }

    /// Create a validation error for a request body that is not valid JSON
    pub fn malformed_body(reason: impl std::fmt::Display) -> Self {
        Self::validation(format!("Request body is not valid JSON: {}", reason))
            .with_details(json!({ "kind": "MalformedBody" }))
    }

    /// Create a not found error (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFoundError", message)
    }

    /// Create a method not allowed error (405)
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowedError", message)
    }

    /// Create a request timeout error (408)
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "TimeoutError", message)
    }

    /// Create a persistence error (500)
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "PersistenceError", message)
    }

    /// Create an internal server error (500) with a generic message
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("Internal error: {}", message);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalError",
            "An internal error occurred",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Body sent to the client
    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.message.clone(),
            code: self.code.to_string(),
            details: self.details.clone(),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        let mut details = json!({
            "kind": err.kind(),
            "path": err.path(),
        });
        if let SchemaError::InvalidEnum { allowed, .. } = &err {
            details["allowed"] = json!(allowed);
        }
        ApiError::validation(err.to_string()).with_details(details)
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        let message = err.to_string();
        match err {
            SettingsError::Validation(schema_error) => schema_error.into(),
            SettingsError::NotFound => ApiError::not_found(message),
            SettingsError::Persistence { .. } => ApiError::persistence(message),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::authentication(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log error server-side
        log_error(&self);

        (self.status, Json(self.to_response_body())).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError) {
    match error.status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!(code = error.code, "API error: {} - {}", error.status, error.message);
        }
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
            tracing::warn!(code = error.code, "API error: {} - {}", error.status, error.message);
        }
        _ => {
            tracing::info!(code = error.code, "API error: {} - {}", error.status, error.message);
        }
    }
}

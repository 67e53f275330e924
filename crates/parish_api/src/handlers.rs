//! HTTP request handlers
//!
//! This module contains all request handlers for the REST API endpoints.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Extracts HTTP request data (body, session extension)
//! 2. Calls the settings manager or the authentication service
//! 3. Records the outcome in the API metrics
//! 4. Returns `Result<_, ApiError>`
//!
//! Request bodies are taken as raw bytes and parsed here, so malformed JSON
//! produces the same `{ "error": ... }` body as every other failure.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Extension, Json,
};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use auth_handler::{AdminSession, AuthError};
use settings_store::{ConfigurationDocument, SettingsError};

use crate::{
    errors::ApiError,
    metrics::{Outcome, SettingsOperation},
    middleware::{expired_session_cookie, session_cookie, session_token_from_headers},
    models::{
        request::LoginRequest,
        response::{AuthStatusResponse, PublicSettingsResponse},
    },
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::malformed_body)
}

fn outcome_of(error: &SettingsError) -> Outcome {
    match error {
        SettingsError::Validation(_) => Outcome::Rejected,
        SettingsError::NotFound | SettingsError::Persistence { .. } => Outcome::Failed,
    }
}

/// GET /api/admin/settings
///
/// Return the whole settings document. Seeds the default document on a
/// fresh deployment.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ConfigurationDocument>, ApiError> {
    match state.settings.current().await {
        Ok(document) => {
            state
                .metrics
                .record_settings(SettingsOperation::AdminRead, Outcome::Ok);
            Ok(Json(document))
        }
        Err(e) => {
            state
                .metrics
                .record_settings(SettingsOperation::AdminRead, outcome_of(&e));
            Err(e.into())
        }
    }
}

/// PUT /api/admin/settings
///
/// Validate the body and replace the stored document with it. Responds with
/// the normalized document that was stored.
///
/// Returns 400 if the body is not JSON or fails validation, and 500 if the
/// write fails. In both cases the stored document is unchanged.
pub async fn put_settings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ConfigurationDocument>, ApiError> {
    let candidate: Value = parse_json_body(&body).map_err(|e| {
        state
            .metrics
            .record_settings(SettingsOperation::Save, Outcome::Rejected);
        e
    })?;

    match state.settings.replace_from_value(&candidate).await {
        Ok(saved) => {
            state
                .metrics
                .record_settings(SettingsOperation::Save, Outcome::Ok);
            Ok(Json(saved))
        }
        Err(e) => {
            state
                .metrics
                .record_settings(SettingsOperation::Save, outcome_of(&e));
            Err(e.into())
        }
    }
}

/// GET /api/admin/auth
///
/// Report the caller's session. Only reached with a valid session; the
/// authentication middleware answers 401 otherwise.
pub async fn auth_status(Extension(session): Extension<AdminSession>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: true,
        expires_at: Some(session.expires_at.to_rfc3339()),
    })
}

/// POST /api/admin/auth/login
///
/// Check the admin password and start a session. The session token is
/// returned only in the `Set-Cookie` header.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: LoginRequest = match parse_json_body(&body) {
        Ok(request) => request,
        Err(e) => {
            state.metrics.record_login(Outcome::Rejected);
            return Err(e);
        }
    };

    let session = match state.auth.login(&SecretString::from(request.password)).await {
        Ok(session) => session,
        Err(e) => {
            state.metrics.record_login(match e {
                AuthError::InvalidCredentials => Outcome::Rejected,
                _ => Outcome::Failed,
            });
            return Err(e.into());
        }
    };
    state.metrics.record_login(Outcome::Ok);

    let max_age = (session.expires_at - session.created_at).num_seconds();
    let cookie = session_cookie(&session.token, max_age, state.secure_cookies);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthStatusResponse {
            authenticated: true,
            expires_at: Some(session.expires_at.to_rfc3339()),
        }),
    ))
}

/// POST /api/admin/auth/logout
///
/// End the caller's session, if any, and clear the cookie. Always 204.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token_from_headers(&headers) {
        if let Err(e) = state.auth.logout(&token).await {
            tracing::warn!(error = %e, "Logout failed");
        }
    }

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, expired_session_cookie(state.secure_cookies))],
    )
}

/// GET /api/settings/public
///
/// Settings needed by public pages: contact, parish, social, feature flags,
/// site toggles and active announcements. No authentication.
pub async fn public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettingsResponse>, ApiError> {
    match state.settings.current().await {
        Ok(document) => {
            state
                .metrics
                .record_settings(SettingsOperation::PublicRead, Outcome::Ok);
            Ok(Json(document.into()))
        }
        Err(e) => {
            state
                .metrics
                .record_settings(SettingsOperation::PublicRead, outcome_of(&e));
            Err(e.into())
        }
    }
}

/// GET /api/metrics
///
/// Prometheus text exposition of the API counters.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::internal(format!("failed to encode metrics: {}", e)))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No endpoint at {}", uri.path()))
}

/// GET /api/health
///
/// Health check endpoint.
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
        error: None,
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,

    /// Error message (if unhealthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

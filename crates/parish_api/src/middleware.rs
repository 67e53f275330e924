//! Authentication and request tracing middleware
//!
//! This module provides middleware for:
//! - Admin session cookie authentication
//! - Request ID logging
//! - JSON error bodies for responses produced outside the handlers

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use auth_handler::{AuthError, SESSION_COOKIE_NAME};

use crate::{errors::ApiError, AppState};

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Header echoing the request ID back to the client.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authentication middleware that validates the admin session cookie.
///
/// Reads the `admin_session` cookie, checks it with the authentication
/// service, and attaches the resulting `AdminSession` to the request
/// extensions for handlers to extract.
///
/// Returns 401 if:
/// - No session cookie is present
/// - The session is unknown or was logged out
/// - The session has expired
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/settings", get(get_settings))
///     .layer(middleware::from_fn_with_state(state.clone(), require_admin_session));
/// ```
pub async fn require_admin_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token_from_headers(request.headers()).ok_or(AuthError::MissingSession)?;

    let session = state.auth.check(&token).await.map_err(|e| {
        tracing::info!(error = %e, "Admin session rejected");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Extract the admin session token from the `Cookie` headers.
///
/// Returns `None` if no non-empty `admin_session` cookie is present.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Build the `Set-Cookie` value for a new session.
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE_NAME,
        token,
        max_age_seconds.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn expired_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Request tracing middleware.
///
/// Assigns a request ID, logs request start and completion, and returns the
/// ID in the `x-request-id` response header.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    // Generate request ID
    let request_id = uuid::Uuid::new_v4().to_string();

    // Log request start
    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Give router and timeout rejections the standard error body.
///
/// axum answers unsupported methods with an empty 405 and `TimeoutLayer`
/// answers with an empty 408. Responses that already carry a
/// `Content-Type` pass through untouched.
pub async fn json_error_envelope(response: Response) -> Response {
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    match response.status() {
        StatusCode::NOT_FOUND => ApiError::not_found("No such endpoint").into_response(),
        StatusCode::METHOD_NOT_ALLOWED => {
            let allow = response.headers().get(header::ALLOW).cloned();
            let mut rewritten =
                ApiError::method_not_allowed("Method not allowed for this endpoint").into_response();
            if let Some(allow) = allow {
                rewritten.headers_mut().insert(header::ALLOW, allow);
            }
            rewritten
        }
        StatusCode::REQUEST_TIMEOUT => {
            ApiError::timeout("Request took too long to complete").into_response()
        }
        _ => response,
    }
}

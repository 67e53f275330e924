//! Tests for routes module

use super::*;
use std::sync::Arc;

use auth_handler::PasswordSessionAuthService;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use secrecy::SecretString;
use settings_store::{InMemorySettingsRepository, SettingsManager};
use tower::ServiceExt;

use crate::ApiMetrics;

fn test_router() -> Router {
    let auth = Arc::new(PasswordSessionAuthService::new(
        SecretString::from("secret"),
        chrono::Duration::minutes(5),
    ));
    let settings = SettingsManager::new(Arc::new(InMemorySettingsRepository::new()));
    let metrics = Arc::new(ApiMetrics::new().unwrap());
    create_router(AppState::new(settings, auth, metrics))
}

async fn send(method: &str, uri: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    test_router().oneshot(request).await.unwrap()
}

async fn status_of(method: &str, uri: &str) -> StatusCode {
    send(method, uri).await.status()
}

async fn error_code_of(method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = send(method, uri).await;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
    (status, body["code"].clone())
}

#[tokio::test]
async fn test_admin_routes_are_protected() {
    assert_eq!(status_of("GET", "/api/admin/settings").await, StatusCode::UNAUTHORIZED);
    assert_eq!(status_of("PUT", "/api/admin/settings").await, StatusCode::UNAUTHORIZED);
    assert_eq!(status_of("GET", "/api/admin/auth").await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_are_open() {
    assert_eq!(status_of("GET", "/api/health").await, StatusCode::OK);
    assert_eq!(status_of("GET", "/api/settings/public").await, StatusCode::OK);
    assert_eq!(status_of("GET", "/api/metrics").await, StatusCode::OK);
    assert_eq!(
        status_of("POST", "/api/admin/auth/logout").await,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    for uri in ["/api/nope", "/health"] {
        let (status, code) = error_code_of("GET", uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NotFoundError");
    }
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    for (method, uri) in [("DELETE", "/api/settings/public"), ("POST", "/api/health")] {
        let (status, code) = error_code_of(method, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(code, "MethodNotAllowedError");
    }
}

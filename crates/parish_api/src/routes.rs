//! HTTP routing configuration
//!
//! This module defines all HTTP routes and their corresponding handlers.
//!
//! # Route Structure
//!
//! All routes are prefixed with `/api`:
//!
//! - GET    /api/admin/settings - Read the settings document (session)
//! - PUT    /api/admin/settings - Replace the settings document (session)
//! - GET    /api/admin/auth - Session status (session)
//! - POST   /api/admin/auth/login - Start a session
//! - POST   /api/admin/auth/logout - End the session
//! - GET    /api/settings/public - Public settings view
//! - GET    /api/metrics - Prometheus counters
//! - GET    /api/health - Health check

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - Session middleware on the admin routes
/// - CORS configuration
/// - Request tracing
/// - Timeout handling
/// - JSON error bodies for unmatched paths, methods and timeouts
pub fn create_router(state: AppState) -> Router {
    // The admin editor is served from the same origin; cross-origin callers
    // only get the public endpoints.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    // Routes that require a valid admin session
    let protected_routes = Router::new()
        .route(
            "/admin/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/admin/auth", get(handlers::auth_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_middleware::require_admin_session,
        ));

    let api = Router::new()
        .merge(protected_routes)
        // Public routes (added after the session middleware)
        .route("/admin/auth/login", post(handlers::login))
        .route("/admin/auth/logout", post(handlers::logout))
        .route("/settings/public", get(handlers::public_settings))
        .route("/metrics", get(handlers::metrics))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(middleware::map_response(api_middleware::json_error_envelope))
}

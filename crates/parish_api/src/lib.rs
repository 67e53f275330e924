//! Parish website settings REST API
//!
//! This crate provides the HTTP API through which the admin editor reads and
//! replaces the site settings document, plus the public read-only view used
//! by page rendering.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Session cookie authentication middleware
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//!
//! Business rules (validation, seeding, persistence) live in
//! `settings_store`; sessions live in `auth_handler`. Neither depends on
//! this crate.

use std::sync::Arc;

use auth_handler::AdminAuthenticationService;
use settings_store::SettingsManager;

pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

// Re-export key types for convenience
pub use errors::{ApiError, ErrorResponse};
pub use metrics::ApiMetrics;
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Access to the settings singleton
    pub settings: SettingsManager,

    /// Admin session checks, login and logout
    pub auth: Arc<dyn AdminAuthenticationService>,

    /// Request counters exposed on the metrics endpoint
    pub metrics: Arc<ApiMetrics>,

    /// Whether the session cookie carries the `Secure` attribute
    pub secure_cookies: bool,
}

impl AppState {
    /// Create application state with service dependencies
    pub fn new(
        settings: SettingsManager,
        auth: Arc<dyn AdminAuthenticationService>,
        metrics: Arc<ApiMetrics>,
    ) -> Self {
        Self {
            settings,
            auth,
            metrics,
            secure_cookies: false,
        }
    }

    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }
}

//! HTTP server configuration and startup
//!
//! This module provides the main server configuration and startup logic.

use anyhow::Context;
use axum::Router;
use secrecy::SecretString;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::net::TcpListener;
use tokio::signal;

use crate::{routes, AppState, DEFAULT_PORT};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Default location of the settings document
pub const DEFAULT_SETTINGS_PATH: &str = "data/settings.json";

/// Default admin session lifetime (8 hours)
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// File holding the settings document
    pub settings_path: PathBuf,

    /// How long an admin session stays valid
    pub session_ttl_minutes: i64,

    /// Add `Secure` to the session cookie
    pub secure_cookies: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            secure_cookies: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `API_HOST` (default: 0.0.0.0)
    /// - `API_PORT` (default: 8080)
    /// - `SETTINGS_PATH` (default: data/settings.json)
    /// - `SESSION_TTL_MINUTES` (default: 480)
    /// - `COOKIE_SECURE` (default: false)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Unset variables take their defaults; set but unparsable ones are
    /// an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let session_ttl_minutes =
            parse_var(&lookup, "SESSION_TTL_MINUTES")?.unwrap_or(defaults.session_ttl_minutes);
        if session_ttl_minutes <= 0 {
            anyhow::bail!("SESSION_TTL_MINUTES must be positive, got {}", session_ttl_minutes);
        }

        Ok(Self {
            port: parse_var(&lookup, "API_PORT")?.unwrap_or(defaults.port),
            host: lookup("API_HOST").unwrap_or(defaults.host),
            settings_path: lookup("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
            session_ttl_minutes,
            secure_cookies: parse_var(&lookup, "COOKIE_SECURE")?.unwrap_or(defaults.secure_cookies),
        })
    }

    /// Session lifetime as a duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

/// Read the admin password from `ADMIN_PASSWORD` through a lookup function.
///
/// # Errors
///
/// Fails if the variable is unset or empty.
pub fn admin_password_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<SecretString> {
    let password = lookup("ADMIN_PASSWORD")
        .filter(|value| !value.is_empty())
        .context("ADMIN_PASSWORD must be set")?;
    Ok(SecretString::from(password))
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {}: '{}'", key, raw))
        })
        .transpose()
}

/// API server
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server with the given configuration.
    pub fn new(config: ApiConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the Axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Start the server and listen for requests.
    ///
    /// This method blocks until the server is shut down gracefully via
    /// CTRL+C (SIGINT) or SIGTERM signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from((
            self.config
                .host
                .parse::<std::net::IpAddr>()
                .with_context(|| format!("Invalid API_HOST: '{}'", self.config.host))?,
            self.config.port,
        ));

        tracing::info!("Starting API server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let app = self.router();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Wait for shutdown signal (CTRL+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

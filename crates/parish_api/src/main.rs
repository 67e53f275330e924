//! Parish settings REST API server
//!
//! Main binary for running the API server in production or development.
//!
//! # Environment Variables
//!
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SETTINGS_PATH`: Settings document file (default: data/settings.json)
//! - `ADMIN_PASSWORD`: Admin login password (required)
//! - `SESSION_TTL_MINUTES`: Admin session lifetime (default: 480)
//! - `COOKIE_SECURE`: Mark the session cookie `Secure` (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::{env, sync::Arc};

use anyhow::Context;
use auth_handler::PasswordSessionAuthService;
use parish_api::{
    server::admin_password_from_lookup, ApiConfig, ApiMetrics, ApiServer, AppState,
};
use settings_store::{FileSettingsRepository, SettingsManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = ApiConfig::from_env()?;
    let admin_password = admin_password_from_lookup(|key| env::var(key).ok())?;

    let repository = Arc::new(FileSettingsRepository::new(config.settings_path.clone()));
    let settings = SettingsManager::new(repository);

    // Seed the default document on first boot
    settings
        .current()
        .await
        .with_context(|| format!("Failed to load {}", config.settings_path.display()))?;

    let auth = Arc::new(PasswordSessionAuthService::new(
        admin_password,
        config.session_ttl(),
    ));
    let metrics = Arc::new(ApiMetrics::new().context("Failed to create metrics registry")?);

    let state = AppState::new(settings, auth, metrics).with_secure_cookies(config.secure_cookies);

    tracing::info!("Starting parish settings API server");
    tracing::info!("Settings file: {}", config.settings_path.display());
    tracing::info!("Session lifetime: {} minutes", config.session_ttl_minutes);

    let server = ApiServer::new(config, state);

    // Start server with graceful shutdown
    server.serve().await
}

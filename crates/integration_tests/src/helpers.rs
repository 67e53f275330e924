//! Helper functions for integration tests.
//!
//! [`TestServer`] runs the real API router on a loopback port, backed by a
//! settings file the test chooses. Starting a second server on the same
//! file simulates a restart.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use auth_handler::PasswordSessionAuthService;
use parish_admin::HttpSettingsClient;
use parish_api::{ApiConfig, ApiMetrics, ApiServer, AppState};
use secrecy::SecretString;
use settings_store::{FileSettingsRepository, SettingsManager};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tracing::info;

/// Admin password every test server accepts.
pub const TEST_ADMIN_PASSWORD: &str = "integration-test-password";

/// Initialize logging for tests
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_test_writer()
        .try_init();
}

/// A running API server.
pub struct TestServer {
    addr: SocketAddr,
    settings_path: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl TestServer {
    /// Start a server storing its settings at `settings_path`.
    ///
    /// Seeds the default document if the file does not exist yet, as the
    /// server binary does.
    pub async fn start(settings_path: impl Into<PathBuf>) -> Result<Self> {
        let settings_path = settings_path.into();

        let repository = Arc::new(FileSettingsRepository::new(settings_path.clone()));
        let settings = SettingsManager::new(repository);
        settings
            .current()
            .await
            .context("Failed to seed settings file")?;

        let auth = Arc::new(PasswordSessionAuthService::new(
            SecretString::from(TEST_ADMIN_PASSWORD),
            chrono::Duration::minutes(30),
        ));
        let metrics = Arc::new(ApiMetrics::new()?);
        let state = AppState::new(settings, auth, metrics);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = ApiServer::new(ApiConfig::default(), state);
        let handle = tokio::spawn(server.serve_on(listener, async {
            let _ = shutdown_rx.await;
        }));

        info!(%addr, path = %settings_path.display(), "Test server started");

        Ok(Self {
            addr,
            settings_path,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// A settings client logged in with the admin password.
    pub async fn admin_client(&self) -> Result<HttpSettingsClient> {
        let mut client = HttpSettingsClient::new(self.base_url())?;
        client
            .login(&SecretString::from(TEST_ADMIN_PASSWORD))
            .await
            .context("Admin login failed")?;
        Ok(client)
    }

    /// Shut the server down and wait for it to finish.
    pub async fn stop(mut self) -> Result<()> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await??;
        }
        Ok(())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

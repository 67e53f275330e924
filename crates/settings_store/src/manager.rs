//! Settings manager.
//!
//! Sits between the HTTP layer and a [`SettingsRepository`] and applies two
//! policies the repository itself does not know about:
//!
//! - **Seeding**: the first read on a fresh deployment stores and returns the
//!   default document instead of failing, so public pages always render.
//! - **Validate before write**: untyped submissions are validated and
//!   normalized; a rejected submission never reaches the repository.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use settings_store::{InMemorySettingsRepository, SettingsManager};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = SettingsManager::new(Arc::new(InMemorySettingsRepository::new()));
//!
//! let seeded = manager.current().await?;
//! assert!(!seeded.website.maintenance_mode);
//!
//! let mut body = serde_json::to_value(&seeded)?;
//! body["website"]["maintenanceMode"] = json!(true);
//! manager.replace_from_value(&body).await?;
//!
//! assert!(manager.current().await?.website.maintenance_mode);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{validate, ConfigurationDocument, SettingsError, SettingsRepository, SettingsResult};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

/// Read and full-replace access to the settings singleton.
#[derive(Clone)]
pub struct SettingsManager {
    repository: Arc<dyn SettingsRepository>,
}

impl SettingsManager {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    /// Return the stored document, seeding the default one on first boot.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Persistence` if the repository cannot be read
    /// or the seed cannot be written.
    #[instrument(skip(self))]
    pub async fn current(&self) -> SettingsResult<ConfigurationDocument> {
        match self.repository.load().await {
            Ok(document) => Ok(document),
            Err(SettingsError::NotFound) => {
                info!("No settings stored yet, seeding default document");
                let document = ConfigurationDocument::default();
                self.repository.replace(&document).await?;
                Ok(document)
            }
            Err(e) => Err(e),
        }
    }

    /// Validate an untyped submission and store it in place of the current
    /// document.
    ///
    /// Returns the normalized document that was stored.
    ///
    /// # Errors
    ///
    /// - `SettingsError::Validation` if the body does not match the schema
    /// - `SettingsError::Persistence` if the write fails
    #[instrument(skip(self, body))]
    pub async fn replace_from_value(&self, body: &Value) -> SettingsResult<ConfigurationDocument> {
        let document = validate(body).map_err(|e| {
            warn!(path = e.path(), error = %e, "Settings submission rejected");
            SettingsError::Validation(e)
        })?;

        self.replace(&document).await?;
        Ok(document)
    }

    /// Store an already typed document in place of the current one.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Persistence` if the write fails. The previous
    /// document stays in place.
    #[instrument(skip(self, document))]
    pub async fn replace(&self, document: &ConfigurationDocument) -> SettingsResult<()> {
        self.repository.replace(document).await?;
        info!(
            announcements = document.website.announcements.len(),
            maintenance_mode = document.website.maintenance_mode,
            "Settings document replaced"
        );
        Ok(())
    }
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager").finish_non_exhaustive()
    }
}

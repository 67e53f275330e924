//! In-process settings storage.
//!
//! Used by tests and by deployments that do not need the document to
//! survive a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{ConfigurationDocument, SettingsError, SettingsRepository, SettingsResult};

#[cfg(test)]
#[path = "memory_repository_tests.rs"]
mod tests;

/// Settings repository holding the document in memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    document: RwLock<Option<ConfigurationDocument>>,
}

impl InMemorySettingsRepository {
    /// Create an empty repository. `load` reports `NotFound` until the
    /// first `replace`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `document`.
    pub fn with_document(document: ConfigurationDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> SettingsResult<ConfigurationDocument> {
        self.document
            .read()
            .await
            .clone()
            .ok_or(SettingsError::NotFound)
    }

    async fn replace(&self, document: &ConfigurationDocument) -> SettingsResult<()> {
        let mut guard = self.document.write().await;
        *guard = Some(document.clone());
        Ok(())
    }
}

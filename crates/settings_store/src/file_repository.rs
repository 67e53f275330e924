//! JSON file settings storage.
//!
//! The document lives in a single pretty-printed JSON file. A replace
//! writes a sibling temporary file, syncs it, and renames it over the
//! target, so the file on disk is always a complete document.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{ConfigurationDocument, SettingsError, SettingsRepository, SettingsResult};

#[cfg(test)]
#[path = "file_repository_tests.rs"]
mod tests;

/// Settings repository backed by a JSON file.
///
/// # Examples
///
/// ```no_run
/// use settings_store::{FileSettingsRepository, SettingsRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = FileSettingsRepository::new("data/settings.json");
/// let document = repository.load().await?;
/// println!("Parish: {}", document.parish.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileSettingsRepository {
    path: PathBuf,
    // Writers share one temporary path.
    write_lock: Mutex<()>,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Staging file written before the atomic rename.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_staged(&self, staged: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = staged.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::File::create(staged).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> SettingsResult<ConfigurationDocument> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SettingsError::NotFound),
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read settings file");
                return Err(SettingsError::persistence(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Stored settings file is not a valid document");
            SettingsError::persistence(format!(
                "stored document at {} is unreadable: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn replace(&self, document: &ConfigurationDocument) -> SettingsResult<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| SettingsError::persistence(format!("failed to serialize settings: {}", e)))?;

        let _guard = self.write_lock.lock().await;
        let staged = self.temp_path();

        if let Err(e) = self.write_staged(&staged, &bytes).await {
            tracing::error!(path = %staged.display(), error = %e, "Failed to write staged settings");
            // Best effort: the target file is untouched either way.
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(SettingsError::persistence(format!(
                "failed to write {}: {}",
                staged.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&staged, &self.path).await {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to move staged settings into place");
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(SettingsError::persistence(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Settings file replaced");
        Ok(())
    }
}

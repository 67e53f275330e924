//! Persistence boundary for the settings document.
//!
//! The document is a singleton: load the whole thing or replace the whole
//! thing. Callers that want to change one field load, mutate their own copy,
//! and replace.

use async_trait::async_trait;

use crate::{ConfigurationDocument, SettingsResult};

/// Storage for the single configuration document.
///
/// # Guarantees
///
/// - `replace` is all-or-nothing: a concurrent or later `load` observes
///   either the previous document or the new one, never a mix.
/// - The last completed `replace` wins. There is no version check.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request handler.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load the stored document.
    ///
    /// # Errors
    ///
    /// - `SettingsError::NotFound` if nothing has been stored yet
    /// - `SettingsError::Persistence` if the storage cannot be read
    async fn load(&self) -> SettingsResult<ConfigurationDocument>;

    /// Overwrite the stored document.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Persistence` if the write fails. The previous
    /// document stays in place.
    async fn replace(&self, document: &ConfigurationDocument) -> SettingsResult<()>;
}

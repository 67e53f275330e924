//! Settings error types.
//!
//! `SchemaError` describes why a submitted document was rejected.
//! `SettingsError` is what repositories and the manager return.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Reasons a candidate document fails schema validation.
///
/// Each variant carries the dotted path of the first offending field,
/// e.g. `website.announcements[1].type`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Settings document must be a JSON object")]
    NotAnObject,

    #[error("Required section missing: {section}")]
    MissingSection { section: String },

    #[error("Required field missing: {path}")]
    MissingField { path: String },

    #[error("Type mismatch at {path}: expected {expected}")]
    TypeMismatch { path: String, expected: String },

    #[error("Invalid value '{value}' at {path}: expected one of {}", .allowed.join(", "))]
    InvalidEnum {
        path: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl SchemaError {
    /// Path of the offending field, or `""` when the whole document is wrong.
    pub fn path(&self) -> &str {
        match self {
            SchemaError::NotAnObject => "",
            SchemaError::MissingSection { section } => section,
            SchemaError::MissingField { path }
            | SchemaError::TypeMismatch { path, .. }
            | SchemaError::InvalidEnum { path, .. } => path,
        }
    }

    /// Machine-readable kind, used in API error details.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaError::NotAnObject => "NotAnObject",
            SchemaError::MissingSection { .. } => "MissingSection",
            SchemaError::MissingField { .. } => "MissingField",
            SchemaError::TypeMismatch { .. } => "TypeMismatch",
            SchemaError::InvalidEnum { .. } => "InvalidEnum",
        }
    }
}

/// Errors returned by settings repositories and the settings manager.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Nothing has been stored yet. Only seen before the first seed.
    #[error("Settings document not found")]
    NotFound,

    #[error("Settings document rejected: {0}")]
    Validation(#[from] SchemaError),

    #[error("Settings storage failure: {reason}")]
    Persistence { reason: String },
}

impl SettingsError {
    pub(crate) fn persistence(reason: impl Into<String>) -> Self {
        SettingsError::Persistence {
            reason: reason.into(),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

use thiserror::Error;

use crate::editor::EditorPhase;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors returned by a settings API client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The API answered 401: no session, or the session expired.
    #[error("Not signed in as an admin: {0}")]
    Unauthorized(String),

    /// The API answered with a non-2xx status other than 401.
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be understood.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Result type for settings API calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by the settings editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The auth check failed on open. Nothing further is allowed.
    #[error("Editor was redirected to sign-in")]
    Redirected,

    /// The editor holds no document yet, or loading failed.
    #[error("Editor is not ready (phase: {phase:?})")]
    NotReady { phase: EditorPhase },

    /// A save is already in flight.
    #[error("A save is already in progress")]
    SaveInFlight,

    /// `finish_save` without a preceding `begin_save`.
    #[error("No save is in progress")]
    NoSaveInFlight,

    #[error("Announcement index {index} is out of range ({len} announcements)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Errors that can occur in the parish admin CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Login with the admin password failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The editor could not load the settings document.
    #[error("Failed to load settings: {0}")]
    Load(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Failed to render output.
    #[error("Failed to format output: {0}")]
    Output(String),
}

//! Parish admin client library.
//!
//! Provides the settings editor state machine, the HTTP client it talks
//! through, and the command implementations behind the `parish-admin` binary.

pub mod client;
pub mod commands;
pub mod editor;
pub mod errors;

pub use client::{HttpSettingsClient, SettingsClient};
pub use editor::{EditorPhase, Notice, NoticeKind, SettingsEditor, SettingsTab, NOTICE_DURATION};
pub use errors::{ClientError, ClientResult, EditorError, Error};

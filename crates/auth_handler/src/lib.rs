//! Admin authentication for the parish website
//!
//! This crate provides the session-based authentication that gates the
//! settings API. An admin logs in with the shared admin password and receives
//! an opaque session token, carried afterwards in a cookie.
//!
//! ## Architecture
//!
//! This crate defines the interface trait that the HTTP layer depends on:
//! - The API depends on [`AdminAuthenticationService`]
//! - [`PasswordSessionAuthService`] implements it with an in-memory session table
//! - The server binary wires everything together

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;

mod password_session_service;

pub use password_session_service::PasswordSessionAuthService;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during admin authentication
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    #[error("No admin session")]
    MissingSession,

    #[error("Unknown or revoked admin session")]
    InvalidSession,

    #[error("Session expired, please log in again")]
    SessionExpired,
}

/// An authenticated admin session.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Opaque token stored in the session cookie
    pub token: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Whether the session is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("token", &"<REDACTED>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Admin authentication service interface
///
/// Handles admin login, session checks and logout.
#[async_trait]
pub trait AdminAuthenticationService: Send + Sync {
    /// Verify the admin password and open a new session
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` if the password does not match
    async fn login(&self, password: &SecretString) -> AuthResult<AdminSession>;

    /// Check that a session token belongs to a live session
    ///
    /// # Errors
    /// - `AuthError::MissingSession` if the token is empty
    /// - `AuthError::InvalidSession` if the token is unknown
    /// - `AuthError::SessionExpired` if the session has expired
    async fn check(&self, token: &str) -> AuthResult<AdminSession>;

    /// End a session. Unknown tokens are ignored.
    async fn logout(&self, token: &str) -> AuthResult<()>;
}

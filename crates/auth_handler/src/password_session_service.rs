//! Password login with in-memory sessions
//!
//! Provides the concrete implementation of `AdminAuthenticationService` used
//! by the API server.

use crate::{AdminAuthenticationService, AdminSession, AuthError, AuthResult};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
#[path = "password_session_service_tests.rs"]
mod tests;

/// Password-based admin authentication service
///
/// Sessions live in process memory, so a server restart logs every admin
/// out.
///
/// # Examples
///
/// ```rust
/// use auth_handler::{AdminAuthenticationService, PasswordSessionAuthService};
/// use chrono::Duration;
/// use secrecy::SecretString;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = PasswordSessionAuthService::new(
///     SecretString::from("parish-admin"),
///     Duration::hours(8),
/// );
///
/// let session = auth.login(&SecretString::from("parish-admin")).await?;
/// assert!(auth.check(&session.token).await.is_ok());
/// # Ok(())
/// # }
/// ```
pub struct PasswordSessionAuthService {
    admin_password: SecretString,
    session_ttl: Duration,
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl PasswordSessionAuthService {
    /// Create a new service
    ///
    /// # Parameters
    /// - `admin_password`: the shared admin password
    /// - `session_ttl`: how long a session stays valid after login
    pub fn new(admin_password: SecretString, session_ttl: Duration) -> Self {
        Self {
            admin_password,
            session_ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every expired session.
    pub async fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions
            .write()
            .await
            .retain(|_, session| !session.is_expired_at(now));
    }

    fn password_matches(&self, candidate: &SecretString) -> bool {
        let expected = self.admin_password.expose_secret().as_bytes();
        let actual = candidate.expose_secret().as_bytes();
        if expected.len() != actual.len() {
            return false;
        }
        // Compare every byte so timing does not reveal the matching prefix.
        expected
            .iter()
            .zip(actual)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[async_trait]
impl AdminAuthenticationService for PasswordSessionAuthService {
    async fn login(&self, password: &SecretString) -> AuthResult<AdminSession> {
        if !self.password_matches(password) {
            tracing::warn!("Admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::new_v4().simple().to_string(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };

        self.purge_expired().await;
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        tracing::info!(expires_at = %session.expires_at, "Admin session created");
        Ok(session)
    }

    async fn check(&self, token: &str) -> AuthResult<AdminSession> {
        if token.is_empty() {
            return Err(AuthError::MissingSession);
        }

        let session = self
            .sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired_at(Utc::now()) {
            self.sessions.write().await.remove(token);
            tracing::info!("Admin session expired");
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    async fn logout(&self, token: &str) -> AuthResult<()> {
        if self.sessions.write().await.remove(token).is_some() {
            tracing::info!("Admin session ended");
        }
        Ok(())
    }
}

impl std::fmt::Debug for PasswordSessionAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordSessionAuthService")
            .field("admin_password", &"<REDACTED>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

//! Settings API clients.
//!
//! The editor talks to the settings service through [`SettingsClient`].
//! [`HttpSettingsClient`] is the implementation used by the CLI: it logs in
//! with the admin password and replays the session cookie on every call.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use auth_handler::SESSION_COOKIE_NAME;
use reqwest::{
    header::{COOKIE, SET_COOKIE},
    Method, RequestBuilder, Response, StatusCode,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use settings_store::ConfigurationDocument;
use tracing::{debug, info, instrument};

use crate::errors::{ClientError, ClientResult};

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Access to the admin settings endpoints.
#[async_trait]
pub trait SettingsClient: Send + Sync {
    /// Whether the current session is an authenticated admin session.
    async fn check_auth(&self) -> ClientResult<bool>;

    /// Fetch the whole settings document.
    async fn fetch(&self) -> ClientResult<ConfigurationDocument>;

    /// Replace the stored document. Returns the document as saved.
    async fn save(&self, document: &ConfigurationDocument)
        -> ClientResult<ConfigurationDocument>;
}

#[async_trait]
impl<T: SettingsClient + ?Sized> SettingsClient for Arc<T> {
    async fn check_auth(&self) -> ClientResult<bool> {
        (**self).check_auth().await
    }

    async fn fetch(&self) -> ClientResult<ConfigurationDocument> {
        (**self).fetch().await
    }

    async fn save(
        &self,
        document: &ConfigurationDocument,
    ) -> ClientResult<ConfigurationDocument> {
        (**self).save(document).await
    }
}

#[async_trait]
impl<'a, T: SettingsClient + ?Sized> SettingsClient for &'a T {
    async fn check_auth(&self) -> ClientResult<bool> {
        (**self).check_auth().await
    }

    async fn fetch(&self) -> ClientResult<ConfigurationDocument> {
        (**self).fetch().await
    }

    async fn save(
        &self,
        document: &ConfigurationDocument,
    ) -> ClientResult<ConfigurationDocument> {
        (**self).save(document).await
    }
}

/// HTTP client for the parish settings API.
pub struct HttpSettingsClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl HttpSettingsClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_token: None,
        })
    }

    /// Use an existing session token instead of logging in.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_token.is_some()
    }

    /// Log in with the admin password and keep the session cookie.
    ///
    /// # Errors
    ///
    /// - `ClientError::Unauthorized` if the password is wrong
    /// - `ClientError::InvalidResponse` if the response sets no session cookie
    #[instrument(skip(self, password), fields(base_url = %self.base_url))]
    pub async fn login(&mut self, password: &SecretString) -> ClientResult<()> {
        let response = self
            .request(Method::POST, "/api/admin/auth/login")
            .json(&json!({ "password": password.expose_secret() }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let token = session_token_from_response(&response).ok_or_else(|| {
            ClientError::InvalidResponse("login response did not set a session cookie".to_string())
        })?;
        self.session_token = Some(token);

        info!("Logged in");
        Ok(())
    }

    /// End the session on the server and forget the cookie.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn logout(&mut self) -> ClientResult<()> {
        if self.session_token.is_none() {
            return Ok(());
        }

        let response = self
            .request(Method::POST, "/api/admin/auth/logout")
            .send()
            .await
            .map_err(transport_error)?;
        self.session_token = None;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.session_token {
            Some(token) => builder.header(COOKIE, format!("{}={}", SESSION_COOKIE_NAME, token)),
            None => builder,
        }
    }
}

impl std::fmt::Debug for HttpSettingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSettingsClient")
            .field("base_url", &self.base_url)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

#[async_trait]
impl SettingsClient for HttpSettingsClient {
    async fn check_auth(&self) -> ClientResult<bool> {
        let response = self
            .request(Method::GET, "/api/admin/auth")
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            _ => Err(error_from_response(response).await),
        }
    }

    async fn fetch(&self) -> ClientResult<ConfigurationDocument> {
        let response = self
            .request(Method::GET, "/api/admin/settings")
            .send()
            .await
            .map_err(transport_error)?;

        document_from_response(response).await
    }

    async fn save(
        &self,
        document: &ConfigurationDocument,
    ) -> ClientResult<ConfigurationDocument> {
        debug!(
            announcements = document.website.announcements.len(),
            "Saving settings document"
        );

        let response = self
            .request(Method::PUT, "/api/admin/settings")
            .json(document)
            .send()
            .await
            .map_err(transport_error)?;

        document_from_response(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Transport(err.to_string())
}

async fn document_from_response(response: Response) -> ClientResult<ConfigurationDocument> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json::<ConfigurationDocument>()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Turn a non-2xx response into a `ClientError`, keeping the API's
/// `{ error, code }` body when there is one.
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    let message = body["error"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized(message);
    }

    ClientError::Api {
        status: status.as_u16(),
        code: body["code"].as_str().unwrap_or("Unknown").to_string(),
        message,
    }
}

fn session_token_from_response(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

//! HTTP response type definitions
//!
//! HTTP response types:
//! - Convert from domain types via `From` trait
//! - Use camelCase for JSON serialization

use serde::{Deserialize, Serialize};
use settings_store::{
    Announcement, ConfigurationDocument, ContactInfo, FeatureFlags, ParishDetails, SocialLinks,
};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Response for the admin session endpoints.
///
/// ```json
/// { "authenticated": true, "expiresAt": "2025-11-12T18:30:00+00:00" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub authenticated: bool,

    /// Session expiry (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Settings as seen by public page rendering.
///
/// Everything in the document except inactive announcements.
/// `showUntil` is passed through uninterpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettingsResponse {
    pub contact: ContactInfo,
    pub parish: ParishDetails,
    pub social: SocialLinks,
    pub website: PublicWebsiteSettings,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicWebsiteSettings {
    /// Active announcements in display order
    pub announcements: Vec<Announcement>,
    pub maintenance_mode: bool,
    pub live_stream_enabled: bool,
    pub live_stream_url: String,
    pub donations_enabled: bool,
    pub donations_url: String,
}

impl From<ConfigurationDocument> for PublicSettingsResponse {
    fn from(document: ConfigurationDocument) -> Self {
        let website = &document.website;
        let website = PublicWebsiteSettings {
            announcements: website.active_announcements().cloned().collect(),
            maintenance_mode: website.maintenance_mode,
            live_stream_enabled: website.live_stream_enabled,
            live_stream_url: website.live_stream_url.clone(),
            donations_enabled: website.donations_enabled,
            donations_url: website.donations_url.clone(),
        };

        Self {
            contact: document.contact,
            parish: document.parish,
            social: document.social,
            website,
            features: document.features,
        }
    }
}

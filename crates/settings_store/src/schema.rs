//! Configuration document types.
//!
//! The document is a singleton holding every editable site setting. Its JSON
//! form uses camelCase keys, matching what the admin editor submits:
//!
//! ```json
//! {
//!   "contact":  { "address": "", "phone": "", "email": "", "emergencyPhone": "", "safeguardingPhone": "" },
//!   "parish":   { "name": "", "location": "", "priest": "", "diocese": "", "established": "" },
//!   "social":   { "facebook": "", "youtube": "", "instagram": "", "twitter": "" },
//!   "website":  {
//!     "announcements": [],
//!     "maintenanceMode": false,
//!     "liveStreamEnabled": false, "liveStreamUrl": "",
//!     "donationsEnabled": false, "donationsUrl": ""
//!   },
//!   "features": { "massBooking": false, "eventRegistration": false, "newsletter": false,
//!                 "prayerRequests": false, "venueHire": false }
//! }
//! ```
//!
//! `Default` produces the empty-but-valid document used for first-boot seeding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// The site's whole mutable configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDocument {
    pub contact: ContactInfo,
    pub parish: ParishDetails,
    pub social: SocialLinks,
    pub website: WebsiteSettings,
    pub features: FeatureFlags,
}

/// Parish office contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub emergency_phone: String,
    pub safeguarding_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParishDetails {
    pub name: String,
    pub location: String,
    pub priest: String,
    pub diocese: String,
    pub established: String,
}

/// Social media links. Each is a URL or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub facebook: String,
    pub youtube: String,
    pub instagram: String,
    pub twitter: String,
}

/// Site-wide toggles and the announcement list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSettings {
    /// Display order is sequence order. New announcements are appended.
    pub announcements: Vec<Announcement>,
    pub maintenance_mode: bool,
    pub live_stream_enabled: bool,
    pub live_stream_url: String,
    pub donations_enabled: bool,
    pub donations_url: String,
}

impl WebsiteSettings {
    /// Announcements with the `active` flag set, in display order.
    ///
    /// `show_until` is not consulted.
    pub fn active_announcements(&self) -> impl Iterator<Item = &Announcement> {
        self.announcements.iter().filter(|a| a.active)
    }
}

/// A banner message shown on public pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// `ann-<unix millis>` when generated by the editor.
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementType,
    pub active: bool,
    /// Advisory display end date. Free-form, usually `YYYY-MM-DD`.
    pub show_until: String,
}

impl Announcement {
    /// A blank, active `info` announcement with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            message: String::new(),
            kind: AnnouncementType::Info,
            active: true,
            show_until: String::new(),
        }
    }
}

/// Visual style of an announcement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    #[default]
    Info,
    Warning,
    Success,
    Error,
}

impl AnnouncementType {
    /// Every accepted value, in wire form.
    pub const ALL: [AnnouncementType; 4] = [
        AnnouncementType::Info,
        AnnouncementType::Warning,
        AnnouncementType::Success,
        AnnouncementType::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::Info => "info",
            AnnouncementType::Warning => "warning",
            AnnouncementType::Success => "success",
            AnnouncementType::Error => "error",
        }
    }

    /// Wire names of every accepted value.
    pub fn allowed_values() -> Vec<String> {
        Self::ALL.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for AnnouncementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown announcement type '{}', expected one of {}",
                    s,
                    Self::allowed_values().join(", ")
                )
            })
    }
}

/// Independent on/off switches for optional site capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub mass_booking: bool,
    pub event_registration: bool,
    pub newsletter: bool,
    pub prayer_requests: bool,
    pub venue_hire: bool,
}

impl FeatureFlags {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::MassBooking => self.mass_booking,
            Feature::EventRegistration => self.event_registration,
            Feature::Newsletter => self.newsletter,
            Feature::PrayerRequests => self.prayer_requests,
            Feature::VenueHire => self.venue_hire,
        }
    }

    /// Set one flag. The other flags are untouched.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::MassBooking => &mut self.mass_booking,
            Feature::EventRegistration => &mut self.event_registration,
            Feature::Newsletter => &mut self.newsletter,
            Feature::PrayerRequests => &mut self.prayer_requests,
            Feature::VenueHire => &mut self.venue_hire,
        };
        *flag = enabled;
    }
}

/// Names a single entry of [`FeatureFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    MassBooking,
    EventRegistration,
    Newsletter,
    PrayerRequests,
    VenueHire,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::MassBooking,
        Feature::EventRegistration,
        Feature::Newsletter,
        Feature::PrayerRequests,
        Feature::VenueHire,
    ];

    /// JSON key of the flag inside the `features` section.
    pub fn key(&self) -> &'static str {
        match self {
            Feature::MassBooking => "massBooking",
            Feature::EventRegistration => "eventRegistration",
            Feature::Newsletter => "newsletter",
            Feature::PrayerRequests => "prayerRequests",
            Feature::VenueHire => "venueHire",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Feature {
    type Err = String;

    /// Accepts the JSON key (`venueHire`) or its kebab-case form (`venue-hire`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| *c != '-' && *c != '_').collect();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.key()).collect();
                format!("unknown feature '{}', expected one of {}", s, known.join(", "))
            })
    }
}

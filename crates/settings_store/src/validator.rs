//! Schema validation for submitted settings documents.
//!
//! [`validate`] walks an untyped JSON value in document order and either
//! produces a normalized [`ConfigurationDocument`] or reports the first
//! offending field.
//!
//! Normalization rules:
//! - string fields are trimmed; an absent string field becomes `""`
//! - an absent boolean field becomes `false`
//! - an absent `website.announcements` becomes an empty list
//! - unknown keys are dropped
//!
//! `null` is never treated as absent: it is a type mismatch like any other
//! wrong primitive.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use settings_store::{validate, SchemaError};
//!
//! let result = validate(&json!({ "contact": {}, "parish": {}, "social": {}, "website": {} }));
//!
//! assert_eq!(
//!     result,
//!     Err(SchemaError::MissingSection { section: "features".to_string() })
//! );
//! ```

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::{
    errors::SchemaError,
    schema::{
        Announcement, AnnouncementType, ConfigurationDocument, ContactInfo, FeatureFlags,
        ParishDetails, SocialLinks, WebsiteSettings,
    },
};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

type Object = Map<String, Value>;

/// Validate and normalize a candidate settings document.
///
/// # Errors
///
/// - `SchemaError::NotAnObject` if `candidate` is not a JSON object
/// - `SchemaError::MissingSection` if a top-level section is absent
/// - `SchemaError::TypeMismatch` if a field has the wrong JSON type
/// - `SchemaError::InvalidEnum` if an announcement `type` is not recognised
/// - `SchemaError::MissingField` if an announcement lacks an `id` or `type`
pub fn validate(candidate: &Value) -> Result<ConfigurationDocument, SchemaError> {
    let root = candidate.as_object().ok_or(SchemaError::NotAnObject)?;

    // All sections must exist before any field is inspected, so a missing
    // section is reported even when an earlier section has a bad field.
    let contact = section(root, "contact")?;
    let parish = section(root, "parish")?;
    let social = section(root, "social")?;
    let website = section(root, "website")?;
    let features = section(root, "features")?;

    let document = ConfigurationDocument {
        contact: validate_contact(contact)?,
        parish: validate_parish(parish)?,
        social: validate_social(social)?,
        website: validate_website(website)?,
        features: validate_features(features)?,
    };

    warn_on_duplicate_ids(&document.website.announcements);

    Ok(document)
}

fn section<'a>(root: &'a Object, name: &str) -> Result<&'a Object, SchemaError> {
    match root.get(name) {
        None => Err(SchemaError::MissingSection {
            section: name.to_string(),
        }),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(type_mismatch(name.to_string(), "object")),
    }
}

fn validate_contact(obj: &Object) -> Result<ContactInfo, SchemaError> {
    Ok(ContactInfo {
        address: string_field(obj, "contact", "address")?,
        phone: string_field(obj, "contact", "phone")?,
        email: string_field(obj, "contact", "email")?,
        emergency_phone: string_field(obj, "contact", "emergencyPhone")?,
        safeguarding_phone: string_field(obj, "contact", "safeguardingPhone")?,
    })
}

fn validate_parish(obj: &Object) -> Result<ParishDetails, SchemaError> {
    Ok(ParishDetails {
        name: string_field(obj, "parish", "name")?,
        location: string_field(obj, "parish", "location")?,
        priest: string_field(obj, "parish", "priest")?,
        diocese: string_field(obj, "parish", "diocese")?,
        established: string_field(obj, "parish", "established")?,
    })
}

fn validate_social(obj: &Object) -> Result<SocialLinks, SchemaError> {
    Ok(SocialLinks {
        facebook: string_field(obj, "social", "facebook")?,
        youtube: string_field(obj, "social", "youtube")?,
        instagram: string_field(obj, "social", "instagram")?,
        twitter: string_field(obj, "social", "twitter")?,
    })
}

fn validate_website(obj: &Object) -> Result<WebsiteSettings, SchemaError> {
    Ok(WebsiteSettings {
        announcements: validate_announcements(obj)?,
        maintenance_mode: bool_field(obj, "website", "maintenanceMode")?,
        live_stream_enabled: bool_field(obj, "website", "liveStreamEnabled")?,
        live_stream_url: string_field(obj, "website", "liveStreamUrl")?,
        donations_enabled: bool_field(obj, "website", "donationsEnabled")?,
        donations_url: string_field(obj, "website", "donationsUrl")?,
    })
}

fn validate_features(obj: &Object) -> Result<FeatureFlags, SchemaError> {
    Ok(FeatureFlags {
        mass_booking: bool_field(obj, "features", "massBooking")?,
        event_registration: bool_field(obj, "features", "eventRegistration")?,
        newsletter: bool_field(obj, "features", "newsletter")?,
        prayer_requests: bool_field(obj, "features", "prayerRequests")?,
        venue_hire: bool_field(obj, "features", "venueHire")?,
    })
}

fn validate_announcements(website: &Object) -> Result<Vec<Announcement>, SchemaError> {
    let items = match website.get("announcements") {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(type_mismatch(
                "website.announcements".to_string(),
                "array",
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let prefix = format!("website.announcements[{}]", index);
            let obj = item
                .as_object()
                .ok_or_else(|| type_mismatch(prefix.clone(), "object"))?;
            validate_announcement(obj, &prefix)
        })
        .collect()
}

fn validate_announcement(obj: &Object, prefix: &str) -> Result<Announcement, SchemaError> {
    let id_path = join(prefix, "id");
    let id = match obj.get("id") {
        None => return Err(SchemaError::MissingField { path: id_path }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(SchemaError::MissingField { path: id_path })
        }
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(type_mismatch(id_path, "string")),
    };

    let title = string_field(obj, prefix, "title")?;
    let message = string_field(obj, prefix, "message")?;

    let type_path = join(prefix, "type");
    let kind = match obj.get("type") {
        None => return Err(SchemaError::MissingField { path: type_path }),
        Some(Value::String(s)) => {
            let raw = s.trim();
            raw.parse::<AnnouncementType>()
                .map_err(|_| SchemaError::InvalidEnum {
                    path: type_path,
                    value: raw.to_string(),
                    allowed: AnnouncementType::allowed_values(),
                })?
        }
        Some(_) => return Err(type_mismatch(type_path, "string")),
    };

    Ok(Announcement {
        id,
        title,
        message,
        kind,
        active: bool_field(obj, prefix, "active")?,
        show_until: string_field(obj, prefix, "showUntil")?,
    })
}

fn string_field(obj: &Object, prefix: &str, key: &str) -> Result<String, SchemaError> {
    match obj.get(key) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(type_mismatch(join(prefix, key), "string")),
    }
}

fn bool_field(obj: &Object, prefix: &str, key: &str) -> Result<bool, SchemaError> {
    match obj.get(key) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(type_mismatch(join(prefix, key), "boolean")),
    }
}

fn join(prefix: &str, key: &str) -> String {
    format!("{}.{}", prefix, key)
}

fn type_mismatch(path: String, expected: &str) -> SchemaError {
    SchemaError::TypeMismatch {
        path,
        expected: expected.to_string(),
    }
}

/// Duplicate ids are accepted; they are only reported.
fn warn_on_duplicate_ids(announcements: &[Announcement]) {
    let mut seen = HashSet::new();
    for announcement in announcements {
        if !seen.insert(announcement.id.as_str()) {
            tracing::warn!(
                announcement_id = %announcement.id,
                "Duplicate announcement id in submitted settings"
            );
        }
    }
}

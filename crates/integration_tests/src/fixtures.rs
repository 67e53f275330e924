//! Test fixtures for integration tests.
//!
//! Settings documents in their JSON wire form, as the editor would submit
//! them.

use serde_json::json;

/// A complete, valid settings document for a small parish.
pub fn parish_settings() -> serde_json::Value {
    json!({
        "contact": {
            "address": "1 Church Lane, Little Snoring",
            "phone": "01234 567890",
            "email": "office@stmarys.example",
            "emergencyPhone": "07700 900000",
            "safeguardingPhone": "07700 900001"
        },
        "parish": {
            "name": "St Mary's",
            "location": "Little Snoring",
            "priest": "Fr. John Smith",
            "diocese": "East Anglia",
            "established": "1850"
        },
        "social": {
            "facebook": "https://facebook.com/stmarys",
            "youtube": "https://youtube.com/@stmarys",
            "instagram": "",
            "twitter": ""
        },
        "website": {
            "announcements": [christmas_announcement()],
            "maintenanceMode": false,
            "liveStreamEnabled": true,
            "liveStreamUrl": "https://youtube.com/@stmarys/live",
            "donationsEnabled": false,
            "donationsUrl": ""
        },
        "features": {
            "massBooking": true,
            "eventRegistration": true,
            "newsletter": false,
            "prayerRequests": true,
            "venueHire": false
        }
    })
}

/// An active info announcement.
pub fn christmas_announcement() -> serde_json::Value {
    json!({
        "id": "ann-1700000000000",
        "title": "Christmas Mass",
        "message": "Midnight Mass at 11:30pm on Christmas Eve",
        "type": "info",
        "active": true,
        "showUntil": "2025-12-26"
    })
}

/// `parish_settings` with one section removed.
pub fn settings_without(section: &str) -> serde_json::Value {
    let mut document = parish_settings();
    if let Some(object) = document.as_object_mut() {
        object.remove(section);
    }
    document
}

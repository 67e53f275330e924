//! Tests for settings document validation.

use super::*;
use serde_json::json;

fn valid_document() -> Value {
    json!({
        "contact": {
            "address": "1 Church Lane",
            "phone": "01234 567890",
            "email": "office@stmarys.example",
            "emergencyPhone": "07700 900000",
            "safeguardingPhone": "07700 900001"
        },
        "parish": {
            "name": "St Mary's",
            "location": "Market Town",
            "priest": "Fr. John",
            "diocese": "Westminster",
            "established": "1850"
        },
        "social": {
            "facebook": "https://facebook.com/stmarys",
            "youtube": "",
            "instagram": "",
            "twitter": ""
        },
        "website": {
            "announcements": [
                {
                    "id": "ann-1700000000000",
                    "title": "Christmas Mass",
                    "message": "Midnight Mass at 23:30",
                    "type": "info",
                    "active": true,
                    "showUntil": "2025-12-26"
                }
            ],
            "maintenanceMode": false,
            "liveStreamEnabled": true,
            "liveStreamUrl": "https://youtube.com/live/abc",
            "donationsEnabled": false,
            "donationsUrl": ""
        },
        "features": {
            "massBooking": true,
            "eventRegistration": false,
            "newsletter": true,
            "prayerRequests": false,
            "venueHire": true
        }
    })
}

// ============================================================================
// Accepted documents
// ============================================================================

#[test]
fn test_validate_accepts_complete_document() {
    let document = validate(&valid_document()).expect("document should be valid");

    assert_eq!(document.parish.name, "St Mary's");
    assert_eq!(document.contact.emergency_phone, "07700 900000");
    assert!(document.website.live_stream_enabled);
    assert_eq!(document.website.announcements.len(), 1);
    assert_eq!(
        document.website.announcements[0].kind,
        AnnouncementType::Info
    );
    assert!(document.features.venue_hire);
    assert!(!document.features.prayer_requests);
}

#[test]
fn test_validate_accepts_serialized_default_document() {
    let value = serde_json::to_value(ConfigurationDocument::default()).unwrap();

    let document = validate(&value).unwrap();

    assert_eq!(document, ConfigurationDocument::default());
}

#[test]
fn test_validate_trims_string_fields() {
    let mut value = valid_document();
    value["parish"]["name"] = json!("  St Mary's  ");
    value["website"]["announcements"][0]["title"] = json!("\tChristmas Mass\n");

    let document = validate(&value).unwrap();

    assert_eq!(document.parish.name, "St Mary's");
    assert_eq!(document.website.announcements[0].title, "Christmas Mass");
}

#[test]
fn test_validate_defaults_absent_fields_inside_sections() {
    let value = json!({
        "contact": {},
        "parish": { "name": "St Mary's" },
        "social": {},
        "website": {},
        "features": { "newsletter": true }
    });

    let document = validate(&value).unwrap();

    assert_eq!(document.contact.address, "");
    assert_eq!(document.parish.name, "St Mary's");
    assert!(document.website.announcements.is_empty());
    assert!(!document.website.maintenance_mode);
    assert!(document.features.newsletter);
    assert!(!document.features.venue_hire);
}

#[test]
fn test_validate_drops_unknown_keys() {
    let mut value = valid_document();
    value["contact"]["fax"] = json!("01234 000000");
    value["theme"] = json!("dark");

    let document = validate(&value).unwrap();
    let round_tripped = serde_json::to_value(&document).unwrap();

    assert!(round_tripped["contact"].get("fax").is_none());
    assert!(round_tripped.get("theme").is_none());
}

#[test]
fn test_validate_accepts_duplicate_announcement_ids() {
    let mut value = valid_document();
    let duplicate = value["website"]["announcements"][0].clone();
    value["website"]["announcements"]
        .as_array_mut()
        .unwrap()
        .push(duplicate);

    let document = validate(&value).unwrap();

    assert_eq!(document.website.announcements.len(), 2);
}

#[test]
fn test_validate_preserves_announcement_order() {
    let mut value = valid_document();
    let announcements = value["website"]["announcements"].as_array_mut().unwrap();
    for (id, kind) in [("ann-2", "warning"), ("ann-3", "error")] {
        announcements.push(json!({
            "id": id,
            "title": "",
            "message": "",
            "type": kind,
            "active": false,
            "showUntil": ""
        }));
    }

    let document = validate(&value).unwrap();
    let ids: Vec<&str> = document
        .website
        .announcements
        .iter()
        .map(|a| a.id.as_str())
        .collect();

    assert_eq!(ids, vec!["ann-1700000000000", "ann-2", "ann-3"]);
    assert_eq!(
        document.website.announcements[2].kind,
        AnnouncementType::Error
    );
}

// ============================================================================
// Rejected documents
// ============================================================================

#[test]
fn test_validate_rejects_non_object() {
    assert_eq!(validate(&json!([1, 2, 3])), Err(SchemaError::NotAnObject));
    assert_eq!(validate(&json!("settings")), Err(SchemaError::NotAnObject));
}

#[test]
fn test_validate_rejects_missing_features_section() {
    let mut value = valid_document();
    value.as_object_mut().unwrap().remove("features");

    assert_eq!(
        validate(&value),
        Err(SchemaError::MissingSection {
            section: "features".to_string()
        })
    );
}

#[test]
fn test_validate_reports_missing_section_before_field_errors() {
    let mut value = valid_document();
    value["contact"]["phone"] = json!(12345);
    value.as_object_mut().unwrap().remove("social");

    assert_eq!(
        validate(&value),
        Err(SchemaError::MissingSection {
            section: "social".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_section_that_is_not_an_object() {
    let mut value = valid_document();
    value["parish"] = json!("St Mary's");

    assert_eq!(
        validate(&value),
        Err(SchemaError::TypeMismatch {
            path: "parish".to_string(),
            expected: "object".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_truthy_string_boolean() {
    let mut value = valid_document();
    value["website"]["maintenanceMode"] = json!("true");

    assert_eq!(
        validate(&value),
        Err(SchemaError::TypeMismatch {
            path: "website.maintenanceMode".to_string(),
            expected: "boolean".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_numeric_boolean_in_features() {
    let mut value = valid_document();
    value["features"]["venueHire"] = json!(1);

    let error = validate(&value).unwrap_err();

    assert_eq!(error.path(), "features.venueHire");
    assert_eq!(error.kind(), "TypeMismatch");
}

#[test]
fn test_validate_rejects_null_string_field() {
    let mut value = valid_document();
    value["contact"]["email"] = Value::Null;

    assert_eq!(
        validate(&value),
        Err(SchemaError::TypeMismatch {
            path: "contact.email".to_string(),
            expected: "string".to_string()
        })
    );
}

#[test]
fn test_validate_reports_first_offending_field() {
    let mut value = valid_document();
    value["contact"]["phone"] = json!(12345);
    value["features"]["newsletter"] = json!("yes");

    assert_eq!(validate(&value).unwrap_err().path(), "contact.phone");
}

#[test]
fn test_validate_rejects_announcements_that_are_not_an_array() {
    let mut value = valid_document();
    value["website"]["announcements"] = json!({ "id": "ann-1" });

    assert_eq!(
        validate(&value),
        Err(SchemaError::TypeMismatch {
            path: "website.announcements".to_string(),
            expected: "array".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_announcement_that_is_not_an_object() {
    let mut value = valid_document();
    value["website"]["announcements"]
        .as_array_mut()
        .unwrap()
        .push(json!("Christmas"));

    assert_eq!(
        validate(&value).unwrap_err().path(),
        "website.announcements[1]"
    );
}

#[test]
fn test_validate_rejects_unknown_announcement_type() {
    let mut value = valid_document();
    value["website"]["announcements"][0]["type"] = json!("urgent");

    assert_eq!(
        validate(&value),
        Err(SchemaError::InvalidEnum {
            path: "website.announcements[0].type".to_string(),
            value: "urgent".to_string(),
            allowed: vec![
                "info".to_string(),
                "warning".to_string(),
                "success".to_string(),
                "error".to_string()
            ]
        })
    );
}

#[test]
fn test_validate_rejects_announcement_type_with_wrong_case() {
    let mut value = valid_document();
    value["website"]["announcements"][0]["type"] = json!("Info");

    assert_eq!(validate(&value).unwrap_err().kind(), "InvalidEnum");
}

#[test]
fn test_validate_rejects_announcement_without_id() {
    let mut value = valid_document();
    value["website"]["announcements"][0]
        .as_object_mut()
        .unwrap()
        .remove("id");

    assert_eq!(
        validate(&value),
        Err(SchemaError::MissingField {
            path: "website.announcements[0].id".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_blank_announcement_id() {
    let mut value = valid_document();
    value["website"]["announcements"][0]["id"] = json!("   ");

    assert_eq!(validate(&value).unwrap_err().kind(), "MissingField");
}

#[test]
fn test_validate_rejects_announcement_without_type() {
    let mut value = valid_document();
    value["website"]["announcements"][0]
        .as_object_mut()
        .unwrap()
        .remove("type");

    assert_eq!(
        validate(&value),
        Err(SchemaError::MissingField {
            path: "website.announcements[0].type".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_non_boolean_announcement_active() {
    let mut value = valid_document();
    value["website"]["announcements"][0]["active"] = json!("false");

    assert_eq!(
        validate(&value).unwrap_err().path(),
        "website.announcements[0].active"
    );
}

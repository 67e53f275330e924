//! Tests for API metrics

use super::*;

#[test]
fn test_counters_start_at_zero() {
    let metrics = ApiMetrics::new().unwrap();

    assert_eq!(
        metrics.settings_count(SettingsOperation::Save, Outcome::Ok),
        0
    );
}

#[test]
fn test_record_settings_increments_matching_counter_only() {
    let metrics = ApiMetrics::new().unwrap();

    metrics.record_settings(SettingsOperation::Save, Outcome::Rejected);
    metrics.record_settings(SettingsOperation::Save, Outcome::Rejected);
    metrics.record_settings(SettingsOperation::AdminRead, Outcome::Ok);

    assert_eq!(
        metrics.settings_count(SettingsOperation::Save, Outcome::Rejected),
        2
    );
    assert_eq!(
        metrics.settings_count(SettingsOperation::AdminRead, Outcome::Ok),
        1
    );
    assert_eq!(
        metrics.settings_count(SettingsOperation::Save, Outcome::Ok),
        0
    );
}

#[test]
fn test_render_uses_text_exposition_format() {
    let metrics = ApiMetrics::new().unwrap();
    metrics.record_settings(SettingsOperation::PublicRead, Outcome::Ok);
    metrics.record_login(Outcome::Rejected);

    let rendered = metrics.render().unwrap();

    assert!(rendered.contains("# TYPE settings_operations_total counter"));
    assert!(rendered
        .contains("settings_operations_total{operation=\"public_read\",outcome=\"ok\"} 1"));
    assert!(rendered.contains("admin_logins_total{outcome=\"rejected\"} 1"));
}

#[test]
fn test_separate_instances_do_not_share_counts() {
    let first = ApiMetrics::new().unwrap();
    let second = ApiMetrics::new().unwrap();

    first.record_settings(SettingsOperation::Save, Outcome::Failed);

    assert_eq!(
        second.settings_count(SettingsOperation::Save, Outcome::Failed),
        0
    );
}

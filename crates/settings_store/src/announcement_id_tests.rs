//! Tests for announcement id generation.

use super::*;
use chrono::TimeZone;

#[test]
fn test_id_uses_prefix_and_millis() {
    let mut generator = AnnouncementIdGenerator::new();
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

    assert_eq!(generator.next_id_at(now), "ann-1700000000123");
}

#[test]
fn test_ids_within_same_millisecond_are_distinct() {
    let mut generator = AnnouncementIdGenerator::new();
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    let first = generator.next_id_at(now);
    let second = generator.next_id_at(now);

    assert_ne!(first, second);
    assert_eq!(second, "ann-1700000000001");
}

#[test]
fn test_ids_stay_increasing_when_clock_goes_backwards() {
    let mut generator = AnnouncementIdGenerator::new();
    let later = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
    let earlier = Utc.timestamp_millis_opt(1_700_000_000_100).unwrap();

    generator.next_id_at(later);

    assert_eq!(generator.next_id_at(earlier), "ann-1700000000501");
}

#[test]
fn test_observe_moves_past_existing_ids() {
    let mut generator = AnnouncementIdGenerator::new();
    generator.observe("ann-1700000009999");
    generator.observe("legacy-7");
    generator.observe("ann-not-a-number");

    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    assert_eq!(generator.next_id_at(now), "ann-1700000010000");
}

#[test]
fn test_observe_ignores_older_ids() {
    let mut generator = AnnouncementIdGenerator::new();
    generator.observe("ann-500");
    generator.observe("ann-100");

    let now = Utc.timestamp_millis_opt(0).unwrap();

    assert_eq!(generator.next_id_at(now), "ann-501");
}

#[test]
fn test_next_id_from_clock_is_well_formed() {
    let mut generator = AnnouncementIdGenerator::new();

    let first = generator.next_id();
    let second = generator.next_id();

    assert!(first.starts_with(ANNOUNCEMENT_ID_PREFIX));
    assert_ne!(first, second);
}

#[test]
fn test_observe_ignores_ids_past_timestamp_range() {
    let mut generator = AnnouncementIdGenerator::new();
    generator.observe("ann-9223372036854775807");

    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    assert_eq!(generator.next_id_at(now), "ann-1700000000000");
    assert_eq!(generator.next_id_at(now), "ann-1700000000001");
}

#[test]
fn test_ids_keep_increasing_after_latest_timestamp() {
    let latest = DateTime::<Utc>::MAX_UTC.timestamp_millis();
    let mut generator = AnnouncementIdGenerator::new();
    generator.observe(&format!("ann-{}", latest));

    let now = Utc.timestamp_millis_opt(0).unwrap();
    let first = generator.next_id_at(now);
    let second = generator.next_id_at(now);

    assert_eq!(first, format!("ann-{}", latest + 1));
    assert_eq!(second, format!("ann-{}", latest + 2));
}

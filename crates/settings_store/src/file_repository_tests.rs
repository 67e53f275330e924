//! Tests for the JSON file settings repository.

use super::*;
use crate::{Announcement, AnnouncementType};
use tempfile::TempDir;

fn sample_document() -> ConfigurationDocument {
    let mut document = ConfigurationDocument::default();
    document.parish.name = "St Mary's".to_string();
    document.contact.email = "office@stmarys.example".to_string();
    document.social.youtube = "https://youtube.com/@stmarys".to_string();
    document.website.live_stream_enabled = true;
    document.features.venue_hire = true;

    let mut announcement = Announcement::new("ann-1700000000000");
    announcement.title = "Christmas Mass".to_string();
    announcement.kind = AnnouncementType::Warning;
    announcement.show_until = "2025-12-26".to_string();
    document.website.announcements.push(announcement);

    document
}

#[tokio::test]
async fn test_load_missing_file_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));

    assert_eq!(repository.load().await, Err(SettingsError::NotFound));
}

#[tokio::test]
async fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));
    let document = sample_document();

    repository.replace(&document).await.unwrap();

    assert_eq!(repository.load().await.unwrap(), document);
}

#[tokio::test]
async fn test_replace_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data").join("settings.json");
    let repository = FileSettingsRepository::new(&path);

    repository.replace(&sample_document()).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_replace_leaves_no_staging_file_behind() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));

    repository.replace(&sample_document()).await.unwrap();

    assert!(!repository.temp_path().exists());
    assert_eq!(
        repository.temp_path().file_name().unwrap(),
        "settings.json.tmp"
    );
}

#[tokio::test]
async fn test_stored_file_uses_wire_format() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));

    repository.replace(&sample_document()).await.unwrap();

    let raw = std::fs::read_to_string(repository.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["website"]["liveStreamEnabled"], true);
    assert_eq!(value["website"]["announcements"][0]["type"], "warning");
    assert_eq!(value["features"]["venueHire"], true);
}

#[tokio::test]
async fn test_failed_replace_keeps_previous_document() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));
    let original = sample_document();
    repository.replace(&original).await.unwrap();

    // A directory in the staging location makes the write fail.
    std::fs::create_dir(repository.temp_path()).unwrap();

    let mut changed = original.clone();
    changed.website.maintenance_mode = true;
    changed.parish.name = "Changed".to_string();

    let result = repository.replace(&changed).await;

    assert!(matches!(result, Err(SettingsError::Persistence { .. })));
    assert_eq!(repository.load().await.unwrap(), original);
}

#[tokio::test]
async fn test_corrupt_file_reports_persistence_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ \"contact\": ").unwrap();
    let repository = FileSettingsRepository::new(&path);

    let result = repository.load().await;

    assert!(matches!(result, Err(SettingsError::Persistence { .. })));
}

#[tokio::test]
async fn test_last_replace_wins() {
    let dir = TempDir::new().unwrap();
    let repository = FileSettingsRepository::new(dir.path().join("settings.json"));
    let mut first = sample_document();
    first.parish.priest = "Fr. John".to_string();
    let mut second = sample_document();
    second.parish.priest = "Fr. Peter".to_string();

    repository.replace(&first).await.unwrap();
    repository.replace(&second).await.unwrap();

    assert_eq!(repository.load().await.unwrap().parish.priest, "Fr. Peter");
}

//! Tests for settings commands.

use super::*;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::Parser;
use settings_store::Announcement;

use crate::errors::{ClientError, ClientResult, EditorError};

struct MemoryClient {
    authorized: bool,
    document: Mutex<ConfigurationDocument>,
    saves: Mutex<usize>,
}

impl MemoryClient {
    fn new(document: ConfigurationDocument) -> Arc<Self> {
        Arc::new(Self {
            authorized: true,
            document: Mutex::new(document),
            saves: Mutex::new(0),
        })
    }

    fn document(&self) -> ConfigurationDocument {
        self.document.lock().unwrap().clone()
    }

    fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl SettingsClient for MemoryClient {
    async fn check_auth(&self) -> ClientResult<bool> {
        Ok(self.authorized)
    }

    async fn fetch(&self) -> ClientResult<ConfigurationDocument> {
        Ok(self.document())
    }

    async fn save(&self, document: &ConfigurationDocument) -> ClientResult<ConfigurationDocument> {
        *self.saves.lock().unwrap() += 1;
        *self.document.lock().unwrap() = document.clone();
        Ok(document.clone())
    }
}

/// Wrapper to parse a subcommand the way the binary does.
#[derive(Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: SettingsCommand,
}

fn parse(args: &[&str]) -> SettingsCommand {
    let mut argv = vec!["parish-admin"];
    argv.extend_from_slice(args);
    TestCli::try_parse_from(argv).unwrap().command
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_feature_accepts_kebab_case() {
    match parse(&["feature", "venue-hire", "on"]) {
        SettingsCommand::Feature { flag, state } => {
            assert_eq!(flag, Feature::VenueHire);
            assert_eq!(state, Toggle::On);
        }
        other => panic!("Expected Feature, got {:?}", other),
    }
}

#[test]
fn test_parse_unknown_feature_fails() {
    let result = TestCli::try_parse_from(["parish-admin", "feature", "bingo", "on"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_announce_defaults() {
    match parse(&["announce", "--title", "Christmas Mass"]) {
        SettingsCommand::Announce {
            title,
            message,
            kind,
            show_until,
            inactive,
        } => {
            assert_eq!(title, "Christmas Mass");
            assert_eq!(message, "");
            assert_eq!(kind, AnnouncementType::Info);
            assert_eq!(show_until, "");
            assert!(!inactive);
        }
        other => panic!("Expected Announce, got {:?}", other),
    }
}

#[test]
fn test_parse_announce_rejects_unknown_type() {
    let result = TestCli::try_parse_from([
        "parish-admin",
        "announce",
        "--title",
        "x",
        "--type",
        "urgent",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_show_json() {
    match parse(&["show", "--format", "json"]) {
        SettingsCommand::Show { format } => assert_eq!(format, OutputFormat::Json),
        other => panic!("Expected Show, got {:?}", other),
    }
}

// ============================================================================
// Execution
// ============================================================================

#[tokio::test]
async fn test_maintenance_on_saves_document() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    let output = execute(&parse(&["maintenance", "on"]), client.clone())
        .await
        .unwrap();

    assert!(output.contains("Maintenance mode on"));
    assert!(client.document().website.maintenance_mode);
    assert_eq!(client.saves(), 1);
}

#[tokio::test]
async fn test_unchanged_setting_is_not_saved() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    let output = execute(&parse(&["maintenance", "off"]), client.clone())
        .await
        .unwrap();

    assert!(output.contains("unchanged"));
    assert_eq!(client.saves(), 0);
}

#[tokio::test]
async fn test_feature_toggle() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    execute(&parse(&["feature", "prayerRequests", "on"]), client.clone())
        .await
        .unwrap();

    let features = client.document().features;
    assert!(features.prayer_requests);
    assert!(!features.newsletter);
}

#[tokio::test]
async fn test_announce_appends_announcement() {
    let mut document = ConfigurationDocument::default();
    document.website.announcements.push(Announcement::new("ann-1"));
    let client = MemoryClient::new(document);

    let cmd = parse(&[
        "announce",
        "--title",
        "Christmas Mass",
        "--message",
        "Midnight Mass at 11:30pm",
        "--type",
        "success",
        "--inactive",
    ]);
    execute(&cmd, client.clone()).await.unwrap();

    let announcements = client.document().website.announcements;
    assert_eq!(announcements.len(), 2);
    assert_eq!(announcements[0].id, "ann-1");
    assert_eq!(announcements[1].title, "Christmas Mass");
    assert_eq!(announcements[1].kind, AnnouncementType::Success);
    assert!(!announcements[1].active);
    assert_ne!(announcements[1].id, "ann-1");
}

#[tokio::test]
async fn test_announce_requires_title() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    let result = execute(&parse(&["announce", "--title", "  "]), client.clone()).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
    assert_eq!(client.saves(), 0);
}

#[tokio::test]
async fn test_remove_announcement_out_of_range() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    let result = execute(&parse(&["remove-announcement", "0"]), client.clone()).await;

    assert!(matches!(
        result,
        Err(Error::Editor(EditorError::IndexOutOfRange { index: 0, len: 0 }))
    ));
}

#[tokio::test]
async fn test_live_stream_with_url() {
    let client = MemoryClient::new(ConfigurationDocument::default());

    let cmd = parse(&["live-stream", "on", "--url", "https://youtube.com/live/abc"]);
    execute(&cmd, client.clone()).await.unwrap();

    let website = client.document().website;
    assert!(website.live_stream_enabled);
    assert_eq!(website.live_stream_url, "https://youtube.com/live/abc");
}

#[tokio::test]
async fn test_donations_off_keeps_url() {
    let mut document = ConfigurationDocument::default();
    document.website.donations_enabled = true;
    document.website.donations_url = "https://give.example".to_string();
    let client = MemoryClient::new(document);

    execute(&parse(&["donations", "off"]), client.clone())
        .await
        .unwrap();

    let website = client.document().website;
    assert!(!website.donations_enabled);
    assert_eq!(website.donations_url, "https://give.example");
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let client = Arc::new(MemoryClient {
        authorized: false,
        document: Mutex::new(ConfigurationDocument::default()),
        saves: Mutex::new(0),
    });

    let result = execute(&parse(&["show"]), client).await;

    assert!(matches!(result, Err(Error::Auth(_))));
}

#[tokio::test]
async fn test_show_json_is_the_document() {
    let mut document = ConfigurationDocument::default();
    document.parish.name = "St Mary's".to_string();
    let client = MemoryClient::new(document.clone());

    let output = execute(&parse(&["show", "--format", "json"]), client)
        .await
        .unwrap();

    let parsed: ConfigurationDocument = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, document);
}

#[test]
fn test_format_document_pretty_lists_announcements() {
    let mut document = ConfigurationDocument::default();
    document.parish.name = "St Mary's".to_string();
    let mut announcement = Announcement::new("ann-7");
    announcement.title = "Roof appeal".to_string();
    document.website.announcements.push(announcement);

    let output = format_document(&document, OutputFormat::Pretty).unwrap();

    assert!(output.contains("St Mary's"));
    assert!(output.contains("Roof appeal"));
    assert!(output.contains("venueHire"));
}

#[test]
fn test_client_error_is_reported() {
    let error: Error = ClientError::Transport("connection refused".to_string()).into();
    assert!(error.to_string().contains("connection refused"));
}

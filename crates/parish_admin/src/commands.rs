//! Settings commands for the parish admin CLI.
//!
//! Each command opens an editor, applies one change and saves it. `show`
//! only reads.
//!
//! # Examples
//!
//! ```bash
//! parish-admin show
//! parish-admin maintenance on
//! parish-admin feature venue-hire off
//! parish-admin announce --title "Christmas Mass" --message "Midnight Mass at 11:30pm"
//! parish-admin remove-announcement 0
//! parish-admin live-stream on --url https://youtube.com/live/abc
//! ```

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use settings_store::{AnnouncementType, ConfigurationDocument, Feature};
use tracing::{debug, instrument};

use crate::{
    client::SettingsClient,
    editor::{EditorPhase, SettingsEditor, SettingsTab},
    errors::Error,
};

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// On/off switch argument.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

/// Output format for `show`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Pretty,
    /// The raw settings document
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show the current settings.
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Turn maintenance mode on or off.
    Maintenance {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Turn one feature flag on or off.
    Feature {
        /// Flag name, e.g. `venueHire` or `venue-hire`.
        flag: Feature,

        #[arg(value_enum)]
        state: Toggle,
    },

    /// Append an announcement.
    Announce {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        message: String,

        /// info, warning, success or error
        #[arg(long = "type", default_value = "info")]
        kind: AnnouncementType,

        /// Advisory end date shown to readers
        #[arg(long, default_value = "")]
        show_until: String,

        /// Add the announcement switched off.
        #[arg(long)]
        inactive: bool,
    },

    /// Remove the announcement at a position (0-based, as listed by `show`).
    RemoveAnnouncement { index: usize },

    /// Turn the live stream link on or off.
    LiveStream {
        #[arg(value_enum)]
        state: Toggle,

        #[arg(long)]
        url: Option<String>,
    },

    /// Turn the donations link on or off.
    Donations {
        #[arg(value_enum)]
        state: Toggle,

        #[arg(long)]
        url: Option<String>,
    },
}

/// Run one command against the settings API and return the text to print.
#[instrument(skip(client))]
pub async fn execute<C: SettingsClient>(cmd: &SettingsCommand, client: C) -> Result<String, Error> {
    let mut editor = SettingsEditor::open(client).await;
    match editor.phase() {
        EditorPhase::Redirected => {
            return Err(Error::Auth("not signed in as an admin".to_string()))
        }
        EditorPhase::LoadFailed { message } => return Err(Error::Load(message.clone())),
        _ => {}
    }

    let summary = match cmd {
        SettingsCommand::Show { format } => {
            let document = editor.document().ok_or_else(|| {
                Error::Load("settings document not available".to_string())
            })?;
            return format_document(document, *format);
        }
        SettingsCommand::Maintenance { state } => {
            editor.select_tab(SettingsTab::Website)?;
            editor.edit(|doc| doc.website.maintenance_mode = state.enabled())?;
            format!("Maintenance mode {}", on_off(state.enabled()))
        }
        SettingsCommand::Feature { flag, state } => {
            editor.select_tab(SettingsTab::Features)?;
            editor.set_feature(*flag, state.enabled())?;
            format!("Feature {} {}", flag, on_off(state.enabled()))
        }
        SettingsCommand::Announce {
            title,
            message,
            kind,
            show_until,
            inactive,
        } => {
            if title.trim().is_empty() {
                return Err(Error::InvalidArguments("--title must not be empty".to_string()));
            }
            editor.select_tab(SettingsTab::Announcements)?;
            let id = editor.add_announcement(|announcement| {
                announcement.title = title.clone();
                announcement.message = message.clone();
                announcement.kind = *kind;
                announcement.show_until = show_until.clone();
                announcement.active = !inactive;
            })?;
            format!("Added announcement {}", id)
        }
        SettingsCommand::RemoveAnnouncement { index } => {
            editor.select_tab(SettingsTab::Announcements)?;
            let removed = editor.remove_announcement(*index)?;
            format!("Removed announcement {} ({})", removed.id, removed.title)
        }
        SettingsCommand::LiveStream { state, url } => {
            editor.select_tab(SettingsTab::Website)?;
            editor.edit(|doc| {
                doc.website.live_stream_enabled = state.enabled();
                if let Some(url) = url {
                    doc.website.live_stream_url = url.clone();
                }
            })?;
            format!("Live stream {}", on_off(state.enabled()))
        }
        SettingsCommand::Donations { state, url } => {
            editor.select_tab(SettingsTab::Website)?;
            editor.edit(|doc| {
                doc.website.donations_enabled = state.enabled();
                if let Some(url) = url {
                    doc.website.donations_url = url.clone();
                }
            })?;
            format!("Donations {}", on_off(state.enabled()))
        }
    };

    if !editor.is_dirty() {
        debug!("Nothing changed, skipping save");
        return Ok(format!("{} (unchanged)", summary));
    }

    editor.save().await?;
    Ok(format!("{} {}", "✓".green(), summary))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Render the settings document for the terminal.
pub fn format_document(document: &ConfigurationDocument, format: OutputFormat) -> Result<String, Error> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(document).map_err(|e| Error::Output(e.to_string()));
    }

    let mut output = String::new();
    let parish = &document.parish;
    let heading = if parish.name.is_empty() {
        "(unnamed parish)".to_string()
    } else {
        parish.name.clone()
    };
    output.push_str(&format!("\n{}\n\n", heading.bold().bright_cyan()));
    output.push_str(&format!("{}: {}\n", "Location".bold(), parish.location));
    output.push_str(&format!("{}: {}\n", "Priest".bold(), parish.priest));
    output.push_str(&format!("{}: {}\n", "Phone".bold(), document.contact.phone));
    output.push_str(&format!("{}: {}\n", "Email".bold(), document.contact.email));

    let website = &document.website;
    output.push_str(&format!("\n{}\n", "Website:".bold()));
    output.push_str(&format!("  maintenance mode: {}\n", flag(website.maintenance_mode)));
    output.push_str(&format!(
        "  live stream: {} {}\n",
        flag(website.live_stream_enabled),
        website.live_stream_url.dimmed()
    ));
    output.push_str(&format!(
        "  donations: {} {}\n",
        flag(website.donations_enabled),
        website.donations_url.dimmed()
    ));

    output.push_str(&format!("\n{}\n", "Features:".bold()));
    for feature in Feature::ALL {
        output.push_str(&format!(
            "  {}: {}\n",
            feature,
            flag(document.features.is_enabled(feature))
        ));
    }

    output.push_str(&format!("\n{}\n", "Announcements:".bold()));
    if website.announcements.is_empty() {
        output.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for (index, announcement) in website.announcements.iter().enumerate() {
        let status = if announcement.active {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        output.push_str(&format!(
            "  [{}] {} {} ({}, {})\n",
            index,
            announcement.id.dimmed(),
            announcement.title.bold(),
            announcement.kind,
            status
        ));
    }

    Ok(output)
}

fn flag(enabled: bool) -> colored::ColoredString {
    if enabled {
        "on".green()
    } else {
        "off".red()
    }
}

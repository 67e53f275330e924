//! Settings editor state machine.
//!
//! An editor holds a working copy of the settings document and a baseline
//! (the last copy the server confirmed). Edits only touch the working copy;
//! nothing reaches the server until [`SettingsEditor::save`].
//!
//! ```text
//! AuthChecking ──unauthorized──▶ Redirected (terminal)
//!      │
//!      ▼
//!   Loading ──failure──▶ LoadFailed
//!      │
//!      ▼
//!    Ready ◀──▶ Editing ──save──▶ Saving ──▶ Ready | Editing
//! ```
//!
//! At most one save is in flight. Saving is split into
//! [`begin_save`](SettingsEditor::begin_save) and
//! [`finish_save`](SettingsEditor::finish_save) so callers that drive the
//! request themselves get the same guarantee as [`save`](SettingsEditor::save).

use std::time::Duration;

use settings_store::{
    Announcement, AnnouncementIdGenerator, ConfigurationDocument, Feature,
};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::{
    client::SettingsClient,
    errors::{ClientResult, EditorError},
};

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;

/// How long a save notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    AuthChecking,
    /// The auth check failed. The editor does nothing further.
    Redirected,
    Loading,
    /// Loading failed. Open a new editor to retry.
    LoadFailed { message: String },
    /// Document loaded, working copy equal to the baseline.
    Ready,
    /// Working copy differs from the baseline.
    Editing,
    Saving,
}

/// Form section currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    Contact,
    Parish,
    Social,
    Website,
    Announcements,
    Features,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient save feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_DURATION
    }
}

/// Editor for the settings document.
pub struct SettingsEditor<C> {
    client: C,
    phase: EditorPhase,
    working: ConfigurationDocument,
    baseline: ConfigurationDocument,
    in_flight: Option<ConfigurationDocument>,
    selected_tab: SettingsTab,
    notice: Option<Notice>,
    ids: AnnouncementIdGenerator,
}

impl<C: SettingsClient> SettingsEditor<C> {
    /// Run the auth check, then load the document.
    ///
    /// The returned editor is `Redirected`, `LoadFailed` or `Ready`.
    #[instrument(skip(client))]
    pub async fn open(client: C) -> Self {
        let mut editor = Self {
            client,
            phase: EditorPhase::AuthChecking,
            working: ConfigurationDocument::default(),
            baseline: ConfigurationDocument::default(),
            in_flight: None,
            selected_tab: SettingsTab::default(),
            notice: None,
            ids: AnnouncementIdGenerator::new(),
        };

        match editor.client.check_auth().await {
            Ok(true) => {}
            Ok(false) => {
                info!("Not signed in, redirecting");
                editor.phase = EditorPhase::Redirected;
                return editor;
            }
            Err(e) => {
                warn!(error = %e, "Auth check failed, redirecting");
                editor.phase = EditorPhase::Redirected;
                return editor;
            }
        }

        editor.phase = EditorPhase::Loading;
        match editor.client.fetch().await {
            Ok(document) => {
                for announcement in &document.website.announcements {
                    editor.ids.observe(&announcement.id);
                }
                editor.working = document.clone();
                editor.baseline = document;
                editor.phase = EditorPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load settings");
                editor.phase = EditorPhase::LoadFailed {
                    message: e.to_string(),
                };
            }
        }

        editor
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The working copy, once loaded.
    pub fn document(&self) -> Option<&ConfigurationDocument> {
        self.has_document().then_some(&self.working)
    }

    /// The last document confirmed by the server, once loaded.
    pub fn baseline(&self) -> Option<&ConfigurationDocument> {
        self.has_document().then_some(&self.baseline)
    }

    pub fn selected_tab(&self) -> SettingsTab {
        self.selected_tab
    }

    /// Whether the working copy has changes the server has not confirmed.
    pub fn is_dirty(&self) -> bool {
        self.has_document() && self.working != self.baseline
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditorPhase::Saving
    }

    /// The current notice, unless it has expired.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired())
    }

    /// Drop the notice once it has expired.
    pub fn clear_expired_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    pub fn select_tab(&mut self, tab: SettingsTab) -> Result<(), EditorError> {
        self.ensure_loaded()?;
        self.selected_tab = tab;
        Ok(())
    }

    /// Change the working copy.
    ///
    /// ```rust,ignore
    /// editor.edit(|doc| doc.parish.name = "St Mary's".to_string())?;
    /// ```
    pub fn edit(&mut self, change: impl FnOnce(&mut ConfigurationDocument)) -> Result<(), EditorError> {
        self.ensure_loaded()?;
        change(&mut self.working);
        self.refresh_phase();
        Ok(())
    }

    pub fn set_feature(&mut self, feature: Feature, enabled: bool) -> Result<(), EditorError> {
        self.edit(|doc| doc.features.set(feature, enabled))
    }

    /// Append a new announcement with a fresh id. Returns the id.
    pub fn add_announcement(
        &mut self,
        fill: impl FnOnce(&mut Announcement),
    ) -> Result<String, EditorError> {
        self.ensure_loaded()?;

        let mut announcement = Announcement::new(self.ids.next_id());
        fill(&mut announcement);
        let id = announcement.id.clone();

        self.edit(|doc| doc.website.announcements.push(announcement))?;
        Ok(id)
    }

    pub fn update_announcement(
        &mut self,
        index: usize,
        change: impl FnOnce(&mut Announcement),
    ) -> Result<(), EditorError> {
        self.ensure_loaded()?;
        self.check_index(index)?;
        self.edit(|doc| change(&mut doc.website.announcements[index]))
    }

    /// Remove the announcement at `index`. The others keep their order.
    pub fn remove_announcement(&mut self, index: usize) -> Result<Announcement, EditorError> {
        self.ensure_loaded()?;
        self.check_index(index)?;

        let removed = self.working.website.announcements.remove(index);
        self.refresh_phase();
        Ok(removed)
    }

    /// Enter `Saving` and return the document to send.
    ///
    /// # Errors
    ///
    /// `EditorError::SaveInFlight` if a save has already begun.
    pub fn begin_save(&mut self) -> Result<ConfigurationDocument, EditorError> {
        if self.phase == EditorPhase::Saving {
            return Err(EditorError::SaveInFlight);
        }
        self.ensure_loaded()?;

        let snapshot = self.working.clone();
        self.in_flight = Some(snapshot.clone());
        self.phase = EditorPhase::Saving;
        Ok(snapshot)
    }

    /// Apply the outcome of the save started by `begin_save`.
    ///
    /// On success the saved document becomes the baseline. The working copy
    /// takes the saved form unless it was edited while the save was in
    /// flight. On failure the working copy is kept as it is.
    pub fn finish_save(
        &mut self,
        result: ClientResult<ConfigurationDocument>,
    ) -> Result<(), EditorError> {
        let sent = self.in_flight.take().ok_or(EditorError::NoSaveInFlight)?;

        match result {
            Ok(saved) => {
                if self.working == sent {
                    self.working = saved.clone();
                }
                self.baseline = saved;
                self.notice = Some(Notice::new(NoticeKind::Success, "Settings saved"));
                info!("Settings saved");
            }
            Err(e) => {
                warn!(error = %e, "Settings save failed");
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    format!("Failed to save settings: {}", e),
                ));
            }
        }

        self.phase = EditorPhase::Ready;
        self.refresh_phase();
        Ok(())
    }

    /// Send the working copy to the server.
    ///
    /// A failed request is reported through the error notice and returned.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let document = self.begin_save()?;
        let result = self.client.save(&document).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);

        self.finish_save(result)?;
        outcome.map_err(EditorError::from)
    }

    fn has_document(&self) -> bool {
        matches!(
            self.phase,
            EditorPhase::Ready | EditorPhase::Editing | EditorPhase::Saving
        )
    }

    fn ensure_loaded(&self) -> Result<(), EditorError> {
        match &self.phase {
            EditorPhase::Redirected => Err(EditorError::Redirected),
            _ if self.has_document() => Ok(()),
            phase => Err(EditorError::NotReady {
                phase: phase.clone(),
            }),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EditorError> {
        let len = self.working.website.announcements.len();
        if index >= len {
            return Err(EditorError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Ready and Editing follow the working copy; Saving is left alone.
    fn refresh_phase(&mut self) {
        if self.phase == EditorPhase::Saving {
            return;
        }
        self.phase = if self.working != self.baseline {
            EditorPhase::Editing
        } else {
            EditorPhase::Ready
        };
    }
}

impl<C> std::fmt::Debug for SettingsEditor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsEditor")
            .field("phase", &self.phase)
            .field("selected_tab", &self.selected_tab)
            .field("dirty", &(self.working != self.baseline))
            .finish_non_exhaustive()
    }
}

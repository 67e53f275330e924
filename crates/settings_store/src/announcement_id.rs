//! Announcement id generation.
//!
//! Ids have the form `ann-<unix millis>`. A generator never hands out the
//! same id twice: when the clock has not advanced since the last id, the
//! next millisecond is used instead.
//!
//! Observed ids whose number lies beyond the last representable timestamp
//! are ignored, so the counter stays far below `i64::MAX`.

use chrono::{DateTime, Utc};

#[cfg(test)]
#[path = "announcement_id_tests.rs"]
mod tests;

/// Prefix shared by every generated announcement id.
pub const ANNOUNCEMENT_ID_PREFIX: &str = "ann-";

/// Issues strictly increasing timestamp ids for one editing session.
///
/// Uniqueness holds only within a single generator. Two admins editing at
/// the same time each have their own generator and are not coordinated.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementIdGenerator {
    last_issued: Option<i64>,
}

impl AnnouncementIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an id from the current time.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(Utc::now())
    }

    /// Generate an id as if the current time were `now`.
    pub fn next_id_at(&mut self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        if let Some(last) = self.last_issued {
            if millis <= last {
                millis = last.saturating_add(1);
            }
        }
        self.last_issued = Some(millis);
        format!("{}{}", ANNOUNCEMENT_ID_PREFIX, millis)
    }

    /// Record an existing id so later ids sort after it.
    ///
    /// Ids that are not of the generated form, or whose number is past the
    /// latest representable timestamp, are ignored.
    pub fn observe(&mut self, id: &str) {
        let Some(millis) = id
            .strip_prefix(ANNOUNCEMENT_ID_PREFIX)
            .and_then(|suffix| suffix.parse::<i64>().ok())
        else {
            return;
        };
        if millis > DateTime::<Utc>::MAX_UTC.timestamp_millis() {
            tracing::debug!(id, "Ignoring announcement id beyond the timestamp range");
            return;
        }

        if self.last_issued.map_or(true, |last| millis > last) {
            self.last_issued = Some(millis);
        }
    }
}

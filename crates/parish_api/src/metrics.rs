//! Prometheus request counters
//!
//! # Metrics
//! - `settings_operations_total{operation, outcome}` (Counter): settings
//!   reads and saves, by outcome (`ok`, `rejected`, `failed`)
//! - `admin_logins_total{outcome}` (Counter): login attempts (`ok`, `rejected`)

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;

/// Settings operation label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOperation {
    AdminRead,
    PublicRead,
    Save,
}

impl SettingsOperation {
    fn label(&self) -> &'static str {
        match self {
            SettingsOperation::AdminRead => "admin_read",
            SettingsOperation::PublicRead => "public_read",
            SettingsOperation::Save => "save",
        }
    }
}

/// Outcome label values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// The caller sent something invalid (bad body, wrong password).
    Rejected,
    /// The server could not complete the operation.
    Failed,
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Rejected => "rejected",
            Outcome::Failed => "failed",
        }
    }
}

/// Prometheus metrics for the API, with their own registry.
pub struct ApiMetrics {
    registry: Registry,
    settings_operations: IntCounterVec,
    admin_logins: IntCounterVec,
}

impl ApiMetrics {
    /// Create the counters and register them with a new registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric cannot be created or registered.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let settings_operations = IntCounterVec::new(
            Opts::new(
                "settings_operations_total",
                "Settings reads and saves by outcome",
            ),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(settings_operations.clone()))?;

        let admin_logins = IntCounterVec::new(
            Opts::new("admin_logins_total", "Admin login attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(admin_logins.clone()))?;

        Ok(Self {
            registry,
            settings_operations,
            admin_logins,
        })
    }

    pub fn record_settings(&self, operation: SettingsOperation, outcome: Outcome) {
        self.settings_operations
            .with_label_values(&[operation.label(), outcome.label()])
            .inc();
    }

    pub fn record_login(&self, outcome: Outcome) {
        self.admin_logins.with_label_values(&[outcome.label()]).inc();
    }

    /// Current count for one settings operation/outcome pair.
    pub fn settings_count(&self, operation: SettingsOperation, outcome: Outcome) -> u64 {
        self.settings_operations
            .with_label_values(&[operation.label(), outcome.label()])
            .get()
    }

    /// Render every metric in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics").finish_non_exhaustive()
    }
}

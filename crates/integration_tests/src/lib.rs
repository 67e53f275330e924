//! Integration testing library for the parish settings service.
//!
//! Starts real API servers backed by a settings file in a temporary
//! directory, and provides the test data the scenarios share.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used types for convenience
pub use helpers::{init_test_logging, TestServer, TEST_ADMIN_PASSWORD};

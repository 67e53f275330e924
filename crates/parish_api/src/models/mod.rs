//! HTTP request and response models
//!
//! This module contains HTTP-specific types for requests and responses.
//! The settings document itself travels in its domain form
//! (`settings_store::ConfigurationDocument`); everything else the API sends
//! or receives is defined here.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::LoginRequest;
pub use response::{AuthStatusResponse, PublicSettingsResponse};

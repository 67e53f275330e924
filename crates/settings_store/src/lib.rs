//! Settings storage for the parish website
//!
//! This crate owns the site's single configuration document: its schema,
//! the validator that turns submitted JSON into a typed document, and the
//! repositories that persist it.
//!
//! ## Architecture
//!
//! - [`schema`] defines the document shape and its defaults.
//! - [`validator`] checks an untyped JSON value against the schema.
//! - [`SettingsRepository`] is the persistence boundary (load / full replace).
//! - [`SettingsManager`] applies the seeding and validate-before-write policies
//!   on top of a repository.
//!
//! The HTTP layer and the editor depend on this crate, never the reverse.

pub mod announcement_id;
pub mod errors;
pub mod file_repository;
pub mod manager;
pub mod memory_repository;
pub mod repository;
pub mod schema;
pub mod validator;

pub use announcement_id::{AnnouncementIdGenerator, ANNOUNCEMENT_ID_PREFIX};
pub use errors::{SchemaError, SettingsError, SettingsResult};
pub use file_repository::FileSettingsRepository;
pub use manager::SettingsManager;
pub use memory_repository::InMemorySettingsRepository;
pub use repository::SettingsRepository;
pub use schema::{
    Announcement, AnnouncementType, ConfigurationDocument, ContactInfo, Feature, FeatureFlags,
    ParishDetails, SocialLinks, WebsiteSettings,
};
pub use validator::validate;

//! Shared utilities, configuration, and error handling for Pitchside
//!
//! This crate provides common functionality used across the Pitchside application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Presence-tracking patch fields for update endpoints
//! - Custom axum extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod patch;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use patch::Patch;

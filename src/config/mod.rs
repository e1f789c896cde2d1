//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Path resolution for data, backups and the audit log
//! - User settings persistence (month and people enumerations, currency)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;

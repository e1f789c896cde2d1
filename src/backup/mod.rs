//! Backup system for the expense tracker
//!
//! A backup is one JSON archive holding the three data files:
//!
//! - `schema_version`: Version for migration support
//! - `created_at`: Timestamp when the backup was created
//! - `expenses`, `categories`, `events`: the raw contents of each data file,
//!   or `null` when the file was absent or unreadable
//!
//! Archives are named `backup-YYYYMMDD-HHMMSS-mmm.json`. Only the newest
//! `backup_retention.count` archives are kept.

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult};

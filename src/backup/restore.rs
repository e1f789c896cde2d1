//! Backup restoration
//!
//! Writes each section of an archive back over its data file. A section
//! that is `null` in the archive had no data file when the backup was
//! taken, so the current file is removed.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::write_json_atomic;

use super::manager::BackupArchive;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: TrackerPaths,
}

impl RestoreManager {
    pub fn new(paths: TrackerPaths) -> Self {
        Self { paths }
    }

    /// Read and parse an archive
    pub fn read_archive(&self, backup_path: &Path) -> TrackerResult<BackupArchive> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| TrackerError::Backup(format!("Failed to read backup file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Backup(format!("Failed to parse backup file: {}", e)))
    }

    /// Restore data from a backup file
    ///
    /// Overwrites current data with the backup contents.
    pub fn restore_from_file(&self, backup_path: &Path) -> TrackerResult<RestoreResult> {
        let archive = self.read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> TrackerResult<RestoreResult> {
        self.paths.ensure_directories()?;

        let mut removed = Vec::new();
        let expenses_restored = restore_section(
            "expenses",
            &archive.expenses,
            &self.paths.expenses_file(),
            &mut removed,
        )?;
        let categories_restored = restore_section(
            "categories",
            &archive.categories,
            &self.paths.categories_file(),
            &mut removed,
        )?;
        let events_restored = restore_section(
            "events",
            &archive.events,
            &self.paths.events_file(),
            &mut removed,
        )?;

        let result = RestoreResult {
            backup_date: archive.created_at,
            expenses_restored,
            categories_restored,
            events_restored,
            removed,
        };

        info!("{}", result.summary());
        Ok(result)
    }
}

/// Write one section back; returns whether data was written
///
/// A `null` section removes the current file and records `name` in `removed`.
fn restore_section(
    name: &'static str,
    section: &Option<Value>,
    target: &Path,
    removed: &mut Vec<&'static str>,
) -> TrackerResult<bool> {
    match section {
        Some(value) if !value.is_null() => {
            write_json_atomic(target, value)?;
            Ok(true)
        }
        _ if target.exists() => {
            fs::remove_file(target).map_err(|e| {
                TrackerError::Backup(format!("Failed to remove {}: {}", target.display(), e))
            })?;
            removed.push(name);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Date the backup was created
    pub backup_date: DateTime<Utc>,
    pub expenses_restored: bool,
    pub categories_restored: bool,
    pub events_restored: bool,
    /// Data files removed because the backup had none
    pub removed: Vec<&'static str>,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = [
            (self.expenses_restored, "expenses"),
            (self.categories_restored, "categories"),
            (self.events_restored, "events"),
        ]
        .into_iter()
        .filter_map(|(restored, name)| restored.then_some(name))
        .collect();

        let mut summary = if parts.is_empty() {
            "Nothing to restore".to_string()
        } else {
            format!("Restored: {}", parts.join(", "))
        };
        if !self.removed.is_empty() {
            summary.push_str(&format!(" (removed: {})", self.removed.join(", ")));
        }
        summary
    }
}

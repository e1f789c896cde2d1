//! Backup creation, listing and retention

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::paths::TrackerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::read_json_value;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expenses: Option<Value>,
    #[serde(default)]
    pub categories: Option<Value>,
    #[serde(default)]
    pub events: Option<Value>,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: TrackerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: TrackerPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of all data files
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> TrackerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| {
                TrackerError::Backup(format!("Failed to create backup directory: {}", e))
            })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: 1,
            created_at: now,
            expenses: read_json_value(self.paths.expenses_file()),
            categories: read_json_value(self.paths.categories_file()),
            events: read_json_value(self.paths.events_file()),
        };

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| TrackerError::Backup(format!("Failed to serialize backup: {}", e)))?;
        fs::write(&backup_path, json)
            .map_err(|e| TrackerError::Backup(format!("Failed to write backup file: {}", e)))?;

        info!("Created backup {}", filename);
        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| TrackerError::Backup(format!("Failed to read backup directory: {}", e)))?
        {
            let path = entry
                .map_err(|e| {
                    TrackerError::Backup(format!("Failed to read directory entry: {}", e))
                })?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete all but the newest `retention.count` backups
    pub fn enforce_retention(&self) -> TrackerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self.list_backups()?.into_iter().skip(self.retention.count) {
            fs::remove_file(&backup.path)
                .map_err(|e| TrackerError::Backup(format!("Failed to delete old backup: {}", e)))?;
            debug!("Deleted old backup {}", backup.filename);
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> TrackerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Find a backup by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            parse_backup_info(&path)
        } else {
            None
        }
    }

    pub fn get_latest_backup(&self) -> TrackerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS` with an optional `-mmm` millisecond suffix
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = stamp.split('-').collect();
    let (date_part, time_part, millis) = match parts.as_slice() {
        [date, time] => (*date, *time, 0),
        [date, time, millis] => (*date, *time, millis.parse().ok()?),
        _ => return None,
    };

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis * 1_000_000)?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}

//! Backup CLI commands

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Back up all data files, then prune old backups
    Create,

    /// List available backups, newest first
    List,

    /// Restore data files from a backup
    ///
    /// Data files that did not exist when the backup was taken are removed.
    Restore {
        /// Backup filename or path ("latest" for the most recent)
        backup: String,

        /// Skip the confirmation step
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &TrackerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> TrackerResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, deleted) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", display_name(&backup_path));
            println!("Location: {}", backup_path.display());
            if !deleted.is_empty() {
                println!("Pruned {} old backup(s)", deleted.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: expenses backup create");
                return Ok(());
            }

            for (i, backup) in backups.iter().enumerate() {
                let age = Utc::now().signed_duration_since(backup.created_at);
                println!(
                    "  {}. {} ({} ago, {})",
                    i + 1,
                    backup.filename,
                    format_duration(age),
                    format_size(backup.size_bytes),
                );
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;
            let restore_manager = RestoreManager::new(paths.clone());
            let archive = restore_manager.read_archive(&backup_path)?;

            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                archive.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );

            if !force {
                println!();
                println!("This will overwrite current expenses, categories and events.");
                println!("To proceed, run again with --force:");
                println!("  expenses backup restore {} --force", backup);
                return Ok(());
            }

            let pre_restore = manager.create_backup()?;
            println!("Current data saved to: {}", display_name(&pre_restore));

            let result = restore_manager.restore_from_archive(&archive)?;
            println!("{}", result.summary());
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &TrackerPaths,
    backup: &str,
) -> TrackerResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| TrackerError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    let candidates = [
        PathBuf::from(backup),
        paths.backup_dir().join(backup),
        paths.backup_dir().join(format!("{}.json", backup)),
    ];

    candidates
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| TrackerError::NotFound {
            entity_type: "Backup",
            identifier: backup.to_string(),
        })
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_duration(chrono::Duration::minutes(90)), "1h");
        assert_eq!(format_duration(chrono::Duration::days(3)), "3d");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}

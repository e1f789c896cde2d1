//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod backup;
pub mod category;
pub mod event;
pub mod expense;
pub mod export;

pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use event::{handle_event_command, EventCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date '{}': use YYYY-MM-DD", input.trim()))
    })
}

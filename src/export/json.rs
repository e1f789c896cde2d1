//! JSON export
//!
//! Exports expenses alone, or every data set together with schema
//! versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Event, Expense};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub categories: Vec<String>,
    pub events: Vec<Event>,
    pub metadata: ExportMetadata,
}

/// Counts for quick reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub category_count: usize,
    pub event_count: usize,
    /// Distinct month labels, in first-seen order
    pub months: Vec<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> Self {
        let expenses = storage.expenses.load();
        let categories = storage.categories.load().names().to_vec();
        let events = storage.events.load();

        let mut months: Vec<String> = Vec::new();
        for month in expenses.iter().filter_map(|e| e.month.as_ref()) {
            if !months.contains(month) {
                months.push(month.clone());
            }
        }

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            category_count: categories.len(),
            event_count: events.len(),
            months,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            categories,
            events,
            metadata,
        }
    }
}

/// Write expenses as a pretty JSON array in the data file format
pub fn export_expenses_json<W: Write>(expenses: &[Expense], writer: &mut W) -> TrackerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, expenses)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))
}

/// Write every data set as one pretty JSON document
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> TrackerResult<()> {
    let export = FullExport::from_storage(storage);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))
}

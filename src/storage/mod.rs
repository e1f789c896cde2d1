//! Storage layer for the expense tracker
//!
//! Each data set lives in its own JSON file under the data directory.
//! Stores are stateless: every read goes to disk and every write replaces
//! the whole file atomically.

pub mod categories;
pub mod events;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod table;

pub use categories::CategoryRepository;
pub use events::EventStore;
pub use expenses::ExpenseStore;
pub use file_io::{read_json_or_default, read_json_value, write_json_atomic};
pub use init::initialize_storage;
pub use table::{reconcile, Record, TableStore};

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseStore,
    pub categories: CategoryRepository,
    pub events: EventStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            events: EventStore::new(paths.events_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TrackerError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log, summarizing the changed fields
    pub fn log_update<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TrackerError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(before), Ok(after)) => generate_diff(&before, &after),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize + ?Sized>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TrackerError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
        assert!(storage.expenses.load().is_empty());
        assert!(storage.events.load().is_empty());
    }

    #[test]
    fn test_log_update_records_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_update(
                EntityType::Expense,
                "exp-1",
                None,
                &json!({"Cantidad": 60}),
                &json!({"Cantidad": 65}),
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].diff_summary.as_deref(), Some("Cantidad: 60 -> 65"));
    }
}

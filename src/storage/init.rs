//! Storage initialization
//!
//! Handles first-run setup and migration of existing data files to the
//! current column set.

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::CategoryList;

use super::categories::CategoryRepository;
use super::events::EventStore;
use super::expenses::ExpenseStore;

/// What `initialize_storage` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// The default category list was written
    pub seeded_categories: bool,
    /// Expense rows rewritten with the current columns
    pub migrated_expenses: usize,
    /// Event rows rewritten with the current columns
    pub migrated_events: usize,
}

/// Initialize storage for a fresh or existing installation
///
/// Seeds the default categories when no category file exists, and rewrites
/// existing expense and event tables so that every row carries every column
/// and a stable id. Never discards existing data.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<InitReport, TrackerError> {
    paths.ensure_directories()?;

    let mut report = InitReport::default();

    if !paths.categories_file().exists() {
        CategoryRepository::new(paths.categories_file()).save(&CategoryList::default())?;
        report.seeded_categories = true;
        info!("Seeded default categories");
    }

    let expenses = ExpenseStore::new(paths.expenses_file());
    let rows = expenses.load();
    if !rows.is_empty() {
        expenses.save(&rows)?;
        report.migrated_expenses = rows.len();
    }

    let events = EventStore::new(paths.events_file());
    let rows = events.load();
    if !rows.is_empty() {
        events.save(&rows)?;
        report.migrated_events = rows.len();
    }

    Ok(report)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TrackerPaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        let report = initialize_storage(&paths).unwrap();

        assert!(report.seeded_categories);
        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert_eq!(
            CategoryRepository::new(paths.categories_file()).load(),
            CategoryList::default()
        );
    }

    #[test]
    fn test_doesnt_overwrite_categories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let repo = CategoryRepository::new(paths.categories_file());
        repo.save(&CategoryList::new(vec!["Propia".to_string()])).unwrap();

        let report = initialize_storage(&paths).unwrap();

        assert!(!report.seeded_categories);
        assert_eq!(repo.load().names(), &["Propia".to_string()]);
    }

    #[test]
    fn test_migrates_legacy_expenses() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.expenses_file(),
            r#"[{"Concepto": "Luz", "Cantidad": 60, "Pagado": false}]"#,
        )
        .unwrap();

        let report = initialize_storage(&paths).unwrap();
        assert_eq!(report.migrated_expenses, 1);

        // Ids are now persisted, so two loads agree
        let store = ExpenseStore::new(paths.expenses_file());
        assert_eq!(store.load(), store.load());
        let raw = std::fs::read_to_string(paths.expenses_file()).unwrap();
        assert!(raw.contains("\"Mes\": null"));
    }
}

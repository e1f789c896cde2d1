//! Category service
//!
//! Provides business logic for the category list: add, rename and remove,
//! with an optional cascade of renames onto expense records.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategoryList, CategoryListError};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Outcome of a rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedCategory {
    pub old: String,
    pub new: String,
    /// Expense records rewritten to the new name
    pub expenses_updated: usize,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List all categories in user order
    pub fn list(&self) -> CategoryList {
        self.storage.categories.load()
    }

    /// Find the stored spelling of a category name
    pub fn find(&self, name: &str) -> Option<String> {
        self.list().find(name).map(str::to_string)
    }

    /// Append a new category
    pub fn add(&self, name: &str) -> TrackerResult<String> {
        let mut categories = self.list();
        categories.add(name).map_err(list_error)?;

        self.storage.categories.save(&categories)?;

        let name = name.trim().to_string();
        self.storage
            .log_create(EntityType::Category, name.clone(), None, &name)?;

        Ok(name)
    }

    /// Rename a category, keeping its position
    ///
    /// With `cascade`, expense records carrying the old name are rewritten
    /// too. Without it they keep the old name.
    pub fn rename(&self, old: &str, new: &str, cascade: bool) -> TrackerResult<RenamedCategory> {
        let mut categories = self.list();
        let old = categories
            .find(old)
            .map(str::to_string)
            .ok_or_else(|| TrackerError::category_not_found(old.trim()))?;

        categories.rename(&old, new).map_err(list_error)?;
        self.storage.categories.save(&categories)?;

        let new = new.trim().to_string();
        self.storage.log_update(
            EntityType::Category,
            new.clone(),
            None,
            &old,
            &new,
        )?;

        let expenses_updated = if cascade {
            self.cascade_rename(&old, &new)?
        } else {
            0
        };

        Ok(RenamedCategory {
            old,
            new,
            expenses_updated,
        })
    }

    /// Remove a category
    ///
    /// Expense records that reference it keep the name.
    pub fn remove(&self, name: &str) -> TrackerResult<String> {
        let mut categories = self.list();
        let name = categories
            .find(name)
            .map(str::to_string)
            .ok_or_else(|| TrackerError::category_not_found(name.trim()))?;

        categories.remove(&name).map_err(list_error)?;
        self.storage.categories.save(&categories)?;

        self.storage
            .log_delete(EntityType::Category, name.clone(), None, &name)?;

        Ok(name)
    }

    fn cascade_rename(&self, old: &str, new: &str) -> TrackerResult<usize> {
        let mut expenses = self.storage.expenses.load();
        let mut updated = 0;

        for expense in expenses.iter_mut() {
            if expense.category.as_deref() == Some(old) {
                expense.category = Some(new.to_string());
                updated += 1;
            }
        }

        if updated > 0 {
            self.storage.expenses.save(&expenses)?;
            info!("Renamed category on {} expenses", updated);
        }

        Ok(updated)
    }
}

fn list_error(err: CategoryListError) -> TrackerError {
    match err {
        CategoryListError::EmptyName => TrackerError::Validation(err.to_string()),
        CategoryListError::Duplicate(name) => TrackerError::duplicate_category(name),
        CategoryListError::Missing(name) => TrackerError::category_not_found(name),
    }
}

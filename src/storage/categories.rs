//! Category list repository
//!
//! The category file is a plain JSON array of strings. When it is absent
//! or unreadable the default seed list is used.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TrackerError;
use crate::models::CategoryList;

use super::file_io::{read_json_or_default, write_json_atomic};

/// Repository for category list persistence
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    path: PathBuf,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the category list, falling back to the default seed
    pub fn load(&self) -> CategoryList {
        let stored: Option<Vec<String>> = read_json_or_default(&self.path);
        match stored {
            Some(names) => CategoryList::new(names),
            None => {
                debug!("No usable category file, using default categories");
                CategoryList::default()
            }
        }
    }

    /// Save the category list to disk
    pub fn save(&self, categories: &CategoryList) -> Result<(), TrackerError> {
        write_json_atomic(&self.path, categories)
    }
}

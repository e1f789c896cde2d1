//! Category list model
//!
//! Categories are plain names kept in user order. New names are appended,
//! renames keep their position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories seeded when no category file exists
pub const DEFAULT_CATEGORIES: [&str; 4] =
    ["Casa", "Deporte", "Alimentación / Hogar", "Salir Fuera"];

/// Ordered list of unique category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryList(Vec<String>);

impl Default for CategoryList {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }
}

impl CategoryList {
    /// Create a list from names, dropping blanks and repeated names
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self(Vec::new());
        for name in names {
            let _ = list.add(&name);
        }
        list
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Position of a category (exact match)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    /// Find the stored spelling of a name
    ///
    /// An exact match (after trimming) wins; otherwise the first name equal
    /// ignoring case is returned.
    pub fn find(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some(index) = self.position(name) {
            return Some(self.0[index].as_str());
        }
        let needle = name.to_lowercase();
        self.0
            .iter()
            .find(|c| c.to_lowercase() == needle)
            .map(|c| c.as_str())
    }

    /// Append a new category
    pub fn add(&mut self, name: &str) -> Result<(), CategoryListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryListError::EmptyName);
        }
        if self.contains(name) {
            return Err(CategoryListError::Duplicate(name.to_string()));
        }
        self.0.push(name.to_string());
        Ok(())
    }

    /// Rename a category in place
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), CategoryListError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(CategoryListError::EmptyName);
        }
        let index = self
            .position(old)
            .ok_or_else(|| CategoryListError::Missing(old.to_string()))?;
        if self.contains(new) {
            return Err(CategoryListError::Duplicate(new.to_string()));
        }
        self.0[index] = new.to_string();
        Ok(())
    }

    /// Remove a category
    pub fn remove(&mut self, name: &str) -> Result<(), CategoryListError> {
        let index = self
            .position(name)
            .ok_or_else(|| CategoryListError::Missing(name.to_string()))?;
        self.0.remove(index);
        Ok(())
    }
}

/// Rejections from category list mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryListError {
    EmptyName,
    Duplicate(String),
    Missing(String),
}

impl fmt::Display for CategoryListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::Duplicate(name) => write!(f, "Category '{}' already exists", name),
            Self::Missing(name) => write!(f, "Category '{}' does not exist", name),
        }
    }
}

impl std::error::Error for CategoryListError {}

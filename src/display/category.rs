//! Category display formatting

use crate::models::CategoryList;

/// Format the category list, numbered in user order
pub fn format_category_list(categories: &CategoryList) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    categories
        .names()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>3}. {}\n", i + 1, name))
        .collect()
}

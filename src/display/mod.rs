//! Display formatting for terminal output
//!
//! Plain-text tables for expenses, categories and events. Positions shown
//! in the first column are the ones accepted by `toggle`, `edit` and
//! `delete`.

pub mod category;
pub mod event;
pub mod expense;

pub use category::format_category_list;
pub use event::format_event_list;
pub use expense::{format_amount, format_balance, format_expense_sheet};

/// Pad or cut `s` to exactly `width` characters
pub(crate) fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:width$}", s, width = width)
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

//! Core data models for the expense tracker
//!
//! Expenses, calendar events and the category list, plus the lenient
//! deserializers used to read older data files.

pub mod category;
pub mod event;
pub mod expense;
pub mod ids;
pub mod wire;

pub use category::{CategoryList, CategoryListError, DEFAULT_CATEGORIES};
pub use event::{
    DateRange, Event, EventDetails, EventPatch, EventTime, EventValidationError, ALL_DAY,
};
pub use expense::{Balance, Expense, ExpensePatch, ExpenseScope, ExpenseValidationError};
pub use ids::{EventId, ExpenseId};

//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, scoping and audit logging.

pub mod category;
pub mod event;
pub mod expense;
pub mod sheet;

pub use category::{CategoryService, RenamedCategory};
pub use event::{CreateEventInput, EventService};
pub use expense::{CreateExpenseInput, ExpenseService};
pub use sheet::MonthSheet;

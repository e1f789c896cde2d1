//! Audit log for the expense tracker
//!
//! Every successful create, update and delete of an expense, category or
//! event is appended to `audit.log` as one JSON line with before/after
//! values. The log is a history for the user; it is never replayed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

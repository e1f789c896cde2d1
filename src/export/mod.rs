//! Export module for the expense tracker
//!
//! - CSV: expenses, one row per record (spreadsheet-compatible)
//! - JSON: expenses alone, or every data set with schema versioning

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_expenses_json, export_full_json, FullExport, EXPORT_SCHEMA_VERSION};

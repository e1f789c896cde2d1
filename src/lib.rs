//! Expense tracker - monthly fixed expenses and calendar events
//!
//! This library provides the core functionality for the `expenses` command
//! line tool. Fixed expenses are recorded per month, marked paid or pending,
//! and grouped by category; calendar events are tracked separately. Each
//! data set is a flat JSON file rewritten in full after every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expenses, events and the category list
//! - `storage`: JSON file storage layer, including scoped reconciliation
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//!
//! let service = ExpenseService::new(&storage, &settings);
//! let sheet = service.list(service.scope("Octubre 2024", None)?);
//! println!("{:?}", sheet.balance());
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};

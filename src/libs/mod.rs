//! Core library modules for chronix.
//!
//! ## Features
//!
//! - **Time values**: decimal hours and `HH:MM` conversion, summing, input repair
//! - **Reports**: timesheet, payroll and global monthly pivots
//! - **Workbooks**: styled sheet model and `.xlsx` serialization
//! - **Data**: backend snapshot loading, calendar helpers, period totals
//! - **Infrastructure**: configuration, data storage, messaging, console views
//!
//! ## Usage
//!
//! ```rust
//! use chronix::libs::reports::payroll_sheet;
//! use chronix::libs::workbook::{build_workbook, WorkbookOptions};
//!
//! let workbook = build_workbook(&[payroll_sheet(&[])], WorkbookOptions::default());
//! assert_eq!(workbook.sheet_names(), vec!["Payroll"]);
//! ```

pub mod calendar;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod models;
pub mod reports;
pub mod sheet;
pub mod snapshot;
pub mod time;
pub mod totals;
pub mod view;
pub mod workbook;

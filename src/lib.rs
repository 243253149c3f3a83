//! # Chronix - timesheet reports for small crews
//!
//! Turns the hours recorded per worker, per project and per day into payroll,
//! timesheet and monthly workbooks.
//!
//! ## Features
//!
//! - **Time Values**: decimal hours to `HH:MM` and back, tolerant of sloppy input
//! - **Timesheets**: worker x day grid per project with row and column totals
//! - **Payroll**: hours, rate and amount per worker
//! - **Global Month**: per-worker summary plus every entry of the month
//! - **Excel Output**: styled `.xlsx` with frozen header, zebra rows and print setup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chronix::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;

//! Report export to `.xlsx` files.
//!
//! The [`Exporter`] is the only part of chronix that touches the disk when
//! producing reports. Each export builds its sheets with
//! [`crate::libs::reports`], serializes the whole workbook into memory and
//! then writes it atomically: bytes go to a uniquely named `<name>.*.part`
//! sibling which is renamed into place, and the partial file is removed if
//! anything fails.
//!
//! ## File Naming
//!
//! - **Payroll**: `payroll_<YYYY-MM>.xlsx`
//! - **Timesheets**: `Timesheets_<today, YYYY-MM-DD>.xlsx`
//! - **Global month**: `Global_<YYYY-MM>.xlsx`
//!
//! ```rust,no_run
//! use chronix::libs::export::Exporter;
//! use chronix::libs::calendar::YearMonth;
//! use chronix::libs::workbook::WorkbookOptions;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let exporter = Exporter::new("reports", WorkbookOptions::default());
//! let path = exporter.export_payroll(&[], YearMonth::current()).await?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

use crate::libs::calendar::YearMonth;
use crate::libs::error::ExportError;
use crate::libs::messages::Message;
use crate::libs::models::{TimeEntry, Worker};
use crate::libs::reports::{self, TimesheetRequest};
use crate::libs::sheet::SheetGrid;
use crate::libs::workbook::{build_workbook, WorkbookOptions};
use crate::msg_success;
use chrono::{Local, NaiveDate};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tokio::{fs, task};

const PART_SUFFIX: &str = ".part";

pub fn payroll_file_name(period: YearMonth) -> String {
    format!("payroll_{}.xlsx", period)
}

pub fn timesheets_file_name(today: NaiveDate) -> String {
    format!("Timesheets_{}.xlsx", today.format("%Y-%m-%d"))
}

pub fn global_file_name(period: YearMonth) -> String {
    format!("Global_{}.xlsx", period)
}

/// Prefix of the temporary files written next to `path`.
pub fn part_prefix(path: &Path) -> String {
    let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    format!("{}.", name)
}

fn persist_bytes(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Random name per call, removed on drop unless persisted.
    let mut part = Builder::new()
        .prefix(&part_prefix(path))
        .suffix(PART_SUFFIX)
        .tempfile_in(dir)?;
    part.write_all(bytes)?;
    part.as_file().sync_all()?;
    part.persist(path).map_err(|error| error.error)?;
    Ok(())
}

/// Writes `bytes` to `path` through a uniquely named temporary sibling and a
/// rename.
///
/// Either the complete file ends up at `path` or nothing does. Concurrent
/// writes to the same `path` never share a temporary file; the last rename
/// wins.
pub async fn write_atomic(path: &Path, bytes: Vec<u8>) -> Result<(), ExportError> {
    let target = path.to_path_buf();
    let written = task::spawn_blocking(move || persist_bytes(&target, &bytes))
        .await
        .map_err(io::Error::other)
        .and_then(|result| result);

    written.map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes report workbooks into one output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    options: WorkbookOptions,
}

impl Exporter {
    /// `options` apply to timesheets as given; payroll and global exports
    /// always skip the print layout but keep the color setting.
    pub fn new(output_dir: impl Into<PathBuf>, options: WorkbookOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn flat_options(&self) -> WorkbookOptions {
        WorkbookOptions {
            apply_print_layout: false,
            ..self.options
        }
    }

    /// Payroll summary of `entries` for `period`.
    pub async fn export_payroll(&self, entries: &[TimeEntry], period: YearMonth) -> Result<PathBuf, ExportError> {
        let sheets = vec![reports::payroll_sheet(entries)];
        self.write(&payroll_file_name(period), &sheets, self.flat_options()).await
    }

    /// Timesheets for one project or for every project of the month.
    pub async fn export_details(&self, request: &TimesheetRequest<'_>) -> Result<PathBuf, ExportError> {
        let sheets = reports::timesheet_sheets(request);
        let today = Local::now().date_naive();
        self.write(&timesheets_file_name(today), &sheets, self.options).await
    }

    /// Per-worker summary and entry details for `period`.
    pub async fn export_global_month(
        &self,
        period: YearMonth,
        workers: &[Worker],
        entries: &[TimeEntry],
    ) -> Result<PathBuf, ExportError> {
        let sheets = reports::global_month_sheets(workers, entries);
        self.write(&global_file_name(period), &sheets, self.flat_options()).await
    }

    async fn write(&self, file_name: &str, sheets: &[SheetGrid], options: WorkbookOptions) -> Result<PathBuf, ExportError> {
        let bytes = build_workbook(sheets, options).to_buffer()?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| ExportError::Write {
                path: self.output_dir.clone(),
                source,
            })?;

        let path = self.output_dir.join(file_name);
        tracing::debug!(path = %path.display(), bytes = bytes.len(), sheets = sheets.len(), "writing workbook");
        write_atomic(&path, bytes).await?;

        msg_success!(Message::ExportCompleted(path.display().to_string()));
        Ok(path)
    }
}

//! Display implementation for chronix messages.
//!
//! Single source of truth for the wording of every message printed by the
//! CLI. Messages with parameters interpolate them here so call sites never
//! build user-facing text themselves.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleExport => "Export settings".to_string(),
            Message::ConfigModuleData => "Data source settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptOutputDir => "Directory for exported workbooks".to_string(),
            Message::PromptOnePageLandscape => "Print timesheets landscape on one page?".to_string(),
            Message::PromptWithColors => "Color header and alternate rows?".to_string(),
            Message::PromptSnapshotPath => "Path to the backend snapshot (JSON)".to_string(),

            // === SNAPSHOT MESSAGES ===
            Message::SnapshotNotConfigured => {
                "No snapshot given. Pass --data <FILE> or run 'chronix init' to set a default.".to_string()
            }
            Message::SnapshotLoaded { entries, workers, projects } => {
                format!("Loaded {} entries, {} workers and {} projects", entries, workers, projects)
            }
            Message::ProjectNotFound(id) => format!("Project '{}' not found in snapshot", id),
            Message::InvalidPeriod(value) => format!("Invalid period '{}', expected YYYY-MM", value),

            // === EXPORT MESSAGES ===
            Message::ExportingReport(report, period) => format!("Exporting {} report for {}...", report, period),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),
            Message::NoEntriesForPeriod(period) => format!("No time entries for {}", period),

            // === TOTALS MESSAGES ===
            Message::TotalsHeader(period) => format!("Totals for {}", period),
            Message::TotalsForProject(name) => format!("Project: {}", name),

            // === TIME MESSAGES ===
            Message::InvalidClockInput(value) => format!("'{}' is not a valid time, expected H or H:MM", value),
        };
        write!(f, "{}", text)
    }
}

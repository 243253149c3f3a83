//! Message type definitions for chronix.
//!
//! Every user-facing string is a variant of [`Message`]; the text lives in
//! the `Display` implementation in [`super::display`]. Variants with data
//! carry the values interpolated into the text.

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleExport,
    ConfigModuleData,
    PromptSelectModules,
    PromptOutputDir,
    PromptOnePageLandscape,
    PromptWithColors,
    PromptSnapshotPath,

    // === SNAPSHOT MESSAGES ===
    SnapshotNotConfigured,
    SnapshotLoaded { entries: usize, workers: usize, projects: usize },
    ProjectNotFound(String), // project id
    InvalidPeriod(String),   // raw input

    // === EXPORT MESSAGES ===
    ExportingReport(String, String), // report, period
    ExportCompleted(String),         // path
    ExportFailed(String),            // error
    NoEntriesForPeriod(String),      // period

    // === TOTALS MESSAGES ===
    TotalsHeader(String), // period
    TotalsForProject(String),

    // === TIME MESSAGES ===
    InvalidClockInput(String),
}

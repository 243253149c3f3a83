pub mod details;
pub mod global;
pub mod init;
pub mod payroll;
pub mod time;
pub mod totals;

use crate::libs::calendar::YearMonth;
use crate::libs::config::Config;
use crate::libs::export::Exporter;
use crate::libs::messages::Message;
use crate::libs::snapshot::Snapshot;
use crate::{msg_bail_anyhow, msg_debug, msg_error_anyhow};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Export the payroll summary of a month")]
    Payroll(payroll::PayrollArgs),
    #[command(about = "Export worker x day timesheets, one sheet per project")]
    Details(details::DetailsArgs),
    #[command(about = "Export the monthly summary and every entry of the month")]
    Global(global::GlobalArgs),
    #[command(about = "Show hours, billing and payroll totals for a month")]
    Totals(totals::TotalsArgs),
    #[command(about = "Convert, sum and repair time values", arg_required_else_help = true)]
    Time(time::TimeArgs),
}

#[derive(Debug, Parser)]
#[command(name = APP_METADATA_NAME, version = APP_METADATA_VERSION, author = APP_METADATA_OWNER, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Payroll(args) => payroll::cmd(args).await,
            Commands::Details(args) => details::cmd(args).await,
            Commands::Global(args) => global::cmd(args).await,
            Commands::Totals(args) => totals::cmd(args),
            Commands::Time(args) => time::cmd(args),
        }
    }
}

/// Snapshot and period options shared by every report command.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Backend snapshot (JSON); defaults to CHRONIX_SNAPSHOT or the configured path
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Month to report on: `current` or `YYYY-MM`
    #[arg(short, long, default_value = "current")]
    pub period: YearMonth,
}

/// Output options shared by the export commands.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory for the workbook; defaults to CHRONIX_OUTPUT_DIR or the configured directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the landscape one-page print layout
    #[arg(long)]
    pub no_landscape: bool,

    /// Skip header and zebra fills
    #[arg(long)]
    pub no_colors: bool,
}

impl SourceArgs {
    pub fn load(&self, config: &Config) -> Result<Snapshot> {
        let path = match self.data.clone().or_else(|| config.snapshot_path()) {
            Some(path) => path,
            None => msg_bail_anyhow!(Message::SnapshotNotConfigured),
        };
        let snapshot = Snapshot::load(&path)?;
        msg_debug!(Message::SnapshotLoaded {
            entries: snapshot.entries.len(),
            workers: snapshot.workers.len(),
            projects: snapshot.projects.len(),
        });
        Ok(snapshot)
    }
}

impl OutputArgs {
    pub fn exporter(&self, config: &Config) -> Exporter {
        let export = config.export_settings();
        let mut options = export.workbook_options();
        if self.no_landscape {
            options.apply_print_layout = false;
        }
        if self.no_colors {
            options.apply_colors = false;
        }
        Exporter::new(self.output.clone().unwrap_or(export.output_dir), options)
    }
}

/// Checks that `project_id` exists in the snapshot.
pub fn require_project(snapshot: &Snapshot, project_id: Option<&str>) -> Result<()> {
    match project_id {
        Some(id) if snapshot.project(id).is_none() => Err(msg_error_anyhow!(Message::ProjectNotFound(id.to_string()))),
        _ => Ok(()),
    }
}

//! Payroll export command.
//!
//! Writes `payroll_<YYYY-MM>.xlsx` with hours, rate and amount per worker for
//! the month, optionally limited to one project.

use super::{require_project, OutputArgs, SourceArgs};
use crate::{
    libs::{config::Config, messages::Message},
    msg_error_anyhow, msg_info, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PayrollArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Only count hours booked on this project id
    #[arg(long)]
    project: Option<String>,
}

pub async fn cmd(args: PayrollArgs) -> Result<()> {
    let config = Config::read()?;
    let snapshot = args.source.load(&config)?;
    let period = args.source.period;
    require_project(&snapshot, args.project.as_deref())?;

    let entries = snapshot.entries_for(period, args.project.as_deref());
    if entries.is_empty() {
        msg_warning!(Message::NoEntriesForPeriod(period.to_string()));
    }

    msg_info!(Message::ExportingReport("payroll".to_string(), period.to_string()));
    args.output
        .exporter(&config)
        .export_payroll(&entries, period)
        .await
        .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;

    Ok(())
}

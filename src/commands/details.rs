//! Timesheet export command.
//!
//! With `--project` a single worker x day sheet is produced for that project;
//! without it every project with hours in the month gets its own sheet.

use super::{require_project, OutputArgs, SourceArgs};
use crate::{
    libs::{config::Config, messages::Message, reports::TimesheetRequest},
    msg_error_anyhow, msg_info, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DetailsArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Project id; every project of the month when omitted
    #[arg(long)]
    project: Option<String>,
}

pub async fn cmd(args: DetailsArgs) -> Result<()> {
    let config = Config::read()?;
    let snapshot = args.source.load(&config)?;
    let period = args.source.period;
    let project_id = args.project.as_deref();
    require_project(&snapshot, project_id)?;

    let all_entries = snapshot.entries_for(period, None);
    let entries = match project_id {
        Some(id) => snapshot.entries_for(period, Some(id)),
        None => all_entries.clone(),
    };
    if entries.is_empty() {
        msg_warning!(Message::NoEntriesForPeriod(period.to_string()));
    }

    let workers = snapshot.report_workers(&all_entries);
    let request = TimesheetRequest {
        month: period,
        project_id,
        projects: &snapshot.projects,
        workers: &workers,
        entries: &entries,
        all_entries: &all_entries,
    };

    msg_info!(Message::ExportingReport("timesheet".to_string(), period.to_string()));
    args.output
        .exporter(&config)
        .export_details(&request)
        .await
        .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;

    Ok(())
}

use super::{require_project, SourceArgs};
use crate::{
    libs::{config::Config, messages::Message, totals::hours_by_worker, totals::Totals, view::View},
    msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TotalsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Restrict the figures to one project id
    #[arg(long)]
    project: Option<String>,
}

pub fn cmd(args: TotalsArgs) -> Result<()> {
    let config = Config::read()?;
    let snapshot = args.source.load(&config)?;
    let period = args.source.period;
    let project_id = args.project.as_deref();
    require_project(&snapshot, project_id)?;

    let entries = snapshot.entries_for(period, project_id);
    msg_print!(Message::TotalsHeader(period.to_string()), true);
    if let Some(project) = project_id.and_then(|id| snapshot.project(id)) {
        msg_print!(Message::TotalsForProject(project.label().unwrap_or(&project.id).to_string()));
    }
    if entries.is_empty() {
        msg_warning!(Message::NoEntriesForPeriod(period.to_string()));
        return Ok(());
    }

    View::totals(&Totals::from_entries(&entries))?;
    if project_id.is_none() {
        View::project_hours(&snapshot.projects, &entries)?;
    }
    View::worker_hours(&snapshot.report_workers(&entries), &hours_by_worker(&entries))?;

    Ok(())
}

//! Global monthly export command: per-worker summary plus every entry.

use super::{OutputArgs, SourceArgs};
use crate::{
    libs::{config::Config, messages::Message},
    msg_error_anyhow, msg_info, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn cmd(args: GlobalArgs) -> Result<()> {
    let config = Config::read()?;
    let snapshot = args.source.load(&config)?;
    let period = args.source.period;

    let entries = snapshot.entries_for(period, None);
    if entries.is_empty() {
        msg_warning!(Message::NoEntriesForPeriod(period.to_string()));
    }
    let workers = snapshot.report_workers(&entries);

    msg_info!(Message::ExportingReport("global".to_string(), period.to_string()));
    args.output
        .exporter(&config)
        .export_global_month(period, &workers, &entries)
        .await
        .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;

    Ok(())
}

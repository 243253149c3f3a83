use super::models::{Project, TimeEntry, Worker};
use super::reports::round2;
use super::time::clock_from_decimal;
use super::totals::{project_hours, Totals};
use anyhow::Result;
use prettytable::{row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    pub fn totals(totals: &Totals) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["HOURS", "DECIMAL", "BILLING", "PAYROLL", "MARGIN"]);
        table.add_row(row![
            clock_from_decimal(totals.hours),
            format!("{:.2}", round2(totals.hours)),
            format!("{:.2}", round2(totals.billing)),
            format!("{:.2}", round2(totals.payroll)),
            format!("{:.2}", round2(totals.margin()))
        ]);
        table.printstd();

        Ok(())
    }

    /// Hours per worker, longest first; workers without hours are skipped.
    pub fn worker_hours(workers: &[Worker], hours: &HashMap<&str, f64>) -> Result<()> {
        let mut lines: Vec<(String, f64)> = workers
            .iter()
            .filter_map(|worker| {
                hours
                    .get(worker.id.as_str())
                    .filter(|h| **h > 0.0)
                    .map(|h| (worker.display_name(), *h))
            })
            .collect();
        lines.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut table = Table::new();
        table.add_row(row!["WORKER", "HOURS", "DECIMAL"]);
        for (name, hours) in lines {
            table.add_row(row![name, clock_from_decimal(hours), format!("{:.2}", round2(hours))]);
        }
        table.printstd();

        Ok(())
    }

    pub fn project_hours(projects: &[Project], entries: &[TimeEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PROJECT", "CLIENT", "HOURS", "DECIMAL"]);
        for project in projects {
            let hours = project_hours(entries, &project.id);
            if hours <= 0.0 {
                continue;
            }
            table.add_row(row![
                project.label().unwrap_or(&project.id),
                project.client.as_deref().unwrap_or(""),
                clock_from_decimal(hours),
                format!("{:.2}", round2(hours))
            ]);
        }
        table.printstd();

        Ok(())
    }
}

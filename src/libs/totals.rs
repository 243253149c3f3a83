//! Headline figures for a period: hours, estimated billing and payroll.

use crate::libs::models::TimeEntry;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub hours: f64,
    /// Σ hours × project bill rate.
    pub billing: f64,
    /// Σ hours × worker pay rate.
    pub payroll: f64,
}

impl Totals {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Self {
        entries.into_iter().fold(Totals::default(), |mut acc, entry| {
            let hours = entry.hours();
            acc.hours += hours;
            acc.billing += hours * entry.project_rate();
            acc.payroll += hours * entry.worker_rate();
            acc
        })
    }

    /// Gross margin between billing and payroll.
    pub fn margin(&self) -> f64 {
        self.billing - self.payroll
    }
}

/// Decimal hours per worker id.
pub fn hours_by_worker(entries: &[TimeEntry]) -> HashMap<&str, f64> {
    entries.iter().fold(HashMap::new(), |mut acc, entry| {
        *acc.entry(entry.worker_id.as_str()).or_insert(0.0) += entry.hours();
        acc
    })
}

/// Decimal hours booked on one project.
pub fn project_hours(entries: &[TimeEntry], project_id: &str) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.project_id == project_id)
        .map(TimeEntry::hours)
        .sum()
}

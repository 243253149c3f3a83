//! Report pivots: time entries reshaped into sheet grids.
//!
//! Each builder here returns [`SheetGrid`]s with the header in row 0, ready
//! for [`crate::libs::workbook::build_workbook`]. Builders are total: missing
//! names, rates or hours degrade to placeholders and zeros.
//!
//! ## Reports
//!
//! - **Timesheet**: worker x day grid of `HH:MM` values, one sheet per project
//! - **Payroll**: hours, rate and amount per worker, highest amount first
//! - **Global month**: per-worker summary plus a flat list of every entry

use crate::cells;
use crate::libs::calendar::YearMonth;
use crate::libs::models::{Project, TimeEntry, Worker, NO_NAME};
use crate::libs::sheet::{Cell, SheetGrid};
use crate::libs::time::{clock_from_decimal, decimal_to_clock, sum_clock_values};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

pub const TOTAL_LABEL: &str = "TOTAL";
pub const PAYROLL_SHEET: &str = "Payroll";
pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAILS_SHEET: &str = "Details";
pub const ALL_PROJECTS_SHEET: &str = "Projects";

const PROJECT_FALLBACK: &str = "Project";

/// Rounds to two decimals, as shown in money and hour columns.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Indexes entries by `(worker_id, work_date)`; later entries win.
pub fn entries_by_key(entries: &[TimeEntry]) -> HashMap<(&str, NaiveDate), &TimeEntry> {
    entries.iter().map(|entry| ((entry.worker_id.as_str(), entry.work_date), entry)).collect()
}

/// Builds the worker x day grid for one month.
///
/// Header is `["Worker", "1 Mon", ..., "Total"]`; each worker row holds the
/// `HH:MM` worked per day (blank when nothing was worked) and its sum; the
/// final TOTAL row sums every column.
pub fn timesheet_rows(entries: &[TimeEntry], workers: &[Worker], month: YearMonth) -> Vec<Vec<Cell>> {
    let days = month.days();
    let by_key = entries_by_key(entries);

    let mut header = cells!["Worker"];
    header.extend(month.day_labels().into_iter().map(Cell::from));
    header.push(Cell::from("Total"));

    let mut daily_columns: Vec<Vec<String>> = vec![Vec::new(); days as usize];
    let mut worker_totals = Vec::with_capacity(workers.len());
    let mut rows = vec![header];

    for worker in workers {
        let daily: Vec<String> = (1..=days)
            .map(|day| {
                month
                    .date(day)
                    .and_then(|date| by_key.get(&(worker.id.as_str(), date)))
                    .map(|entry| entry.hours())
                    .filter(|hours| *hours > 0.0)
                    .map(|hours| decimal_to_clock(Some(hours)))
                    .unwrap_or_default()
            })
            .collect();

        let total = sum_clock_values(&daily);
        for (column, value) in daily_columns.iter_mut().zip(&daily) {
            column.push(value.clone());
        }

        let mut row = cells![worker.display_name()];
        row.extend(daily.into_iter().map(Cell::from));
        row.push(Cell::from(total.clone()));
        worker_totals.push(total);
        rows.push(row);
    }

    let mut total_row = cells![TOTAL_LABEL];
    total_row.extend(daily_columns.iter().map(|column| Cell::from(sum_clock_values(column))));
    total_row.push(Cell::from(sum_clock_values(&worker_totals)));
    rows.push(total_row);

    rows
}

/// Inputs for the timesheet export.
#[derive(Debug, Clone, Copy)]
pub struct TimesheetRequest<'a> {
    pub month: YearMonth,
    /// Selected project; `None` exports every project.
    pub project_id: Option<&'a str>,
    pub projects: &'a [Project],
    pub workers: &'a [Worker],
    /// Entries of the selected project.
    pub entries: &'a [TimeEntry],
    /// Entries of every project in the month.
    pub all_entries: &'a [TimeEntry],
}

fn project_sheet_name(projects: &[Project], id: &str) -> String {
    let name = projects
        .iter()
        .find(|project| project.id == id)
        .and_then(Project::label)
        .unwrap_or(PROJECT_FALLBACK);
    format!("Project - {}", name)
}

fn workers_with_entries(workers: &[Worker], entries: &[&TimeEntry]) -> Vec<Worker> {
    let ids: HashSet<&str> = entries.iter().map(|entry| entry.worker_id.as_str()).collect();
    workers.iter().filter(|worker| ids.contains(worker.id.as_str())).cloned().collect()
}

fn project_sheet(request: &TimesheetRequest<'_>, project_id: &str, entries: &[&TimeEntry]) -> SheetGrid {
    let sheet_workers = workers_with_entries(request.workers, entries);
    let owned: Vec<TimeEntry> = entries.iter().map(|entry| (*entry).clone()).collect();
    SheetGrid::new(
        project_sheet_name(request.projects, project_id),
        timesheet_rows(&owned, &sheet_workers, request.month),
    )
}

/// Timesheet sheets for one project or for every project of the month.
///
/// Each sheet lists only the workers who have at least one entry on it. When
/// no project is selected and the month has no entries at all, a single
/// sheet lists every worker with empty days.
pub fn timesheet_sheets(request: &TimesheetRequest<'_>) -> Vec<SheetGrid> {
    if let Some(project_id) = request.project_id {
        let entries: Vec<&TimeEntry> = request.entries.iter().collect();
        return vec![project_sheet(request, project_id, &entries)];
    }

    let mut order: Vec<&str> = Vec::new();
    let mut by_project: HashMap<&str, Vec<&TimeEntry>> = HashMap::new();
    for entry in request.all_entries {
        let key = entry.project_id.as_str();
        by_project
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(entry);
    }

    if order.is_empty() {
        return vec![SheetGrid::new(
            ALL_PROJECTS_SHEET,
            timesheet_rows(&[], request.workers, request.month),
        )];
    }

    order
        .into_iter()
        .map(|project_id| project_sheet(request, project_id, &by_project[project_id]))
        .collect()
}

#[derive(Debug, Clone, Default)]
struct PayrollLine {
    minutes: i64,
    rate: f64,
    amount: f64,
}

fn payroll_name(entry: &TimeEntry) -> String {
    match &entry.worker {
        Some(worker) => {
            let name = worker.display_name();
            if name.is_empty() {
                entry.worker_id.clone()
            } else {
                name
            }
        }
        None => entry.worker_id.clone(),
    }
}

/// Payroll grid: one row per worker sorted by amount, then a TOTAL row.
///
/// Rows are `[name, HH:MM, rate, amount]`. Minutes are accumulated per entry
/// (`round(hours * 60)`), the most recent non-zero rate is kept and the
/// amount is `Σ hours × rate` at the rate of each entry.
pub fn payroll_rows(entries: &[TimeEntry]) -> Vec<Vec<Cell>> {
    let mut order: Vec<String> = Vec::new();
    let mut lines: HashMap<String, PayrollLine> = HashMap::new();

    for entry in entries {
        let name = payroll_name(entry);
        let hours = entry.hours();
        let rate = entry.worker_rate();

        let line = lines.entry(name.clone()).or_insert_with(|| {
            order.push(name);
            PayrollLine { rate, ..Default::default() }
        });
        line.minutes += (hours * 60.0).round() as i64;
        line.amount += hours * rate;
        if rate != 0.0 {
            line.rate = rate;
        }
    }

    let mut summary: Vec<(String, PayrollLine)> = order
        .into_iter()
        .filter_map(|name| lines.remove(&name).map(|line| (name, line)))
        .collect();
    summary.sort_by(|a, b| b.1.amount.total_cmp(&a.1.amount));

    let mut body: Vec<Vec<Cell>> = summary
        .into_iter()
        .map(|(name, line)| {
            let rate = if line.rate != 0.0 { Cell::Number(round2(line.rate)) } else { Cell::Empty };
            vec![
                Cell::from(name),
                Cell::from(clock_from_decimal(line.minutes as f64 / 60.0)),
                rate,
                Cell::Number(round2(line.amount)),
            ]
        })
        .collect();

    if body.is_empty() {
        body.push(vec![Cell::from(NO_NAME), Cell::from("00:00"), Cell::Empty, Cell::Number(0.0)]);
    }

    let hours: Vec<&str> = body.iter().filter_map(|row| row[1].as_text()).collect();
    let total_hours = sum_clock_values(&hours);
    let total_amount = round2(body.iter().filter_map(|row| row[3].as_number()).sum());

    let mut rows = vec![cells!["Worker", "Hours", "Rate", "Amount"]];
    rows.extend(body);
    rows.push(vec![
        Cell::from(TOTAL_LABEL),
        Cell::from(total_hours),
        Cell::Empty,
        Cell::Number(total_amount),
    ]);
    rows
}

pub fn payroll_sheet(entries: &[TimeEntry]) -> SheetGrid {
    SheetGrid::new(PAYROLL_SHEET, payroll_rows(entries))
}

#[derive(Debug, Clone)]
struct WorkerMonth {
    name: String,
    email: String,
    hours: f64,
    days: BTreeSet<NaiveDate>,
    rate: f64,
}

fn display_or_placeholder(worker: &Worker) -> String {
    let name = worker.display_name();
    if name.is_empty() {
        NO_NAME.to_string()
    } else {
        name
    }
}

fn global_summary_rows(workers: &[Worker], entries: &[TimeEntry]) -> Vec<Vec<Cell>> {
    let known: HashMap<&str, &Worker> = workers.iter().map(|worker| (worker.id.as_str(), worker)).collect();
    let mut by_worker: HashMap<&str, WorkerMonth> = HashMap::new();

    for entry in entries {
        let hours = entry.hours();
        if hours == 0.0 {
            continue;
        }

        let worker = known.get(entry.worker_id.as_str()).copied().or(entry.worker.as_ref());
        let (name, email) = match worker {
            Some(worker) => (display_or_placeholder(worker), worker.contact_email()),
            None => (NO_NAME.to_string(), String::new()),
        };
        let rate = worker.map(Worker::rate).filter(|rate| *rate != 0.0).unwrap_or_else(|| entry.worker_rate());

        let summary = by_worker.entry(entry.worker_id.as_str()).or_insert_with(|| WorkerMonth {
            name: name.clone(),
            email: email.clone(),
            hours: 0.0,
            days: BTreeSet::new(),
            rate,
        });
        summary.hours += hours;
        summary.days.insert(entry.work_date);
        if rate != 0.0 {
            summary.rate = rate;
        }
    }

    let mut summaries: Vec<WorkerMonth> = by_worker.into_values().collect();
    summaries.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut total_hours = 0.0;
    let mut total_days = 0;
    let mut total_pay = 0.0;

    let mut rows = vec![cells!["Name", "Email", "Total hours", "Days", "Hourly rate", "Total pay"]];
    for summary in summaries {
        let hours = round2(summary.hours);
        let pay = round2(summary.hours * summary.rate);
        total_hours += hours;
        total_days += summary.days.len();
        total_pay += pay;

        let rate = if summary.rate != 0.0 { Cell::Number(round2(summary.rate)) } else { Cell::Empty };
        rows.push(vec![
            Cell::from(summary.name),
            Cell::from(summary.email),
            Cell::Number(hours),
            Cell::from(summary.days.len()),
            rate,
            Cell::Number(pay),
        ]);
    }

    rows.push(vec![
        Cell::from(TOTAL_LABEL),
        Cell::from(""),
        Cell::Number(round2(total_hours)),
        Cell::from(total_days),
        Cell::Empty,
        Cell::Number(round2(total_pay)),
    ]);
    rows
}

fn global_detail_rows(entries: &[TimeEntry]) -> Vec<Vec<Cell>> {
    let mut sorted: Vec<(&TimeEntry, String)> = entries.iter().map(|entry| (entry, entry.worker_name())).collect();
    sorted.sort_by(|(a, a_name), (b, b_name)| a.work_date.cmp(&b.work_date).then_with(|| compare_names(a_name, b_name)));

    let mut rows = vec![cells!["Date", "Worker", "Project", "Hours", "Notes"]];
    rows.extend(sorted.into_iter().map(|(entry, name)| {
        vec![
            Cell::from(entry.work_date.format("%Y-%m-%d").to_string()),
            Cell::from(name),
            Cell::from(entry.project_name()),
            Cell::Number(round2(entry.hours())),
            Cell::from(entry.note_text()),
        ]
    }));
    rows
}

/// Monthly "Summary" and "Details" sheets across every project.
pub fn global_month_sheets(workers: &[Worker], entries: &[TimeEntry]) -> Vec<SheetGrid> {
    vec![
        SheetGrid::new(SUMMARY_SHEET, global_summary_rows(workers, entries)),
        SheetGrid::new(DETAILS_SHEET, global_detail_rows(entries)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::models::EntryStatus;

    fn worker(id: &str, name: &str, rate: Option<f64>) -> Worker {
        Worker {
            id: id.to_string(),
            full_name: Some(name.to_string()),
            pay_rate: rate,
            ..Default::default()
        }
    }

    fn entry(worker: &Worker, project: &str, date: &str, hours: f64) -> TimeEntry {
        TimeEntry {
            worker_id: worker.id.clone(),
            project_id: project.to_string(),
            work_date: date.parse().unwrap(),
            hours,
            status: EntryStatus::Worked,
            note: None,
            worker: Some(worker.clone()),
            project: None,
        }
    }

    fn july() -> YearMonth {
        YearMonth::new(2024, 7).unwrap()
    }

    #[test]
    fn test_timesheet_totals() {
        let a = worker("a", "Alice", None);
        let b = worker("b", "Bruno", None);
        let entries = vec![
            entry(&a, "p1", "2024-07-01", 4.0),
            entry(&a, "p1", "2024-07-02", 3.5),
            entry(&b, "p1", "2024-07-01", 8.0),
        ];
        let rows = timesheet_rows(&entries, &[a, b], july());

        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 33));
        assert_eq!(rows[0][0], Cell::from("Worker"));
        assert_eq!(rows[0][1], Cell::from("1 Mon"));
        assert_eq!(rows[0][32], Cell::from("Total"));

        assert_eq!(rows[1][1], Cell::from("04:00"));
        assert_eq!(rows[1][3], Cell::from(""));
        assert_eq!(rows[1][32], Cell::from("07:30"));

        let total = &rows[3];
        assert_eq!(total[0], Cell::from(TOTAL_LABEL));
        assert_eq!(total[1], Cell::from("12:00"));
        assert_eq!(total[2], Cell::from("03:30"));
        assert_eq!(total[3], Cell::from("00:00"));
        assert_eq!(total[32], Cell::from("15:30"));
    }

    #[test]
    fn test_zero_and_missing_hours_are_blank() {
        let a = worker("a", "Alice", None);
        let entries = vec![entry(&a, "p1", "2024-07-05", 0.0)];
        let rows = timesheet_rows(&entries, &[a], july());
        assert_eq!(rows[1][5], Cell::from(""));
        assert_eq!(rows[1][32], Cell::from("00:00"));
    }

    #[test]
    fn test_timesheet_sheets_per_project() {
        let a = worker("a", "Alice", None);
        let b = worker("b", "Bruno", None);
        let c = worker("c", "Chloé", None);
        let projects = vec![
            Project {
                id: "p1".to_string(),
                name: "Gare".to_string(),
                ..Default::default()
            },
            Project {
                id: "p2".to_string(),
                name: " ".to_string(),
                ..Default::default()
            },
        ];
        let all = vec![
            entry(&b, "p2", "2024-07-03", 2.0),
            entry(&a, "p1", "2024-07-01", 4.0),
        ];
        let workers = vec![a, b, c];
        let request = TimesheetRequest {
            month: july(),
            project_id: None,
            projects: &projects,
            workers: &workers,
            entries: &[],
            all_entries: &all,
        };

        let sheets = timesheet_sheets(&request);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Project - Project");
        assert_eq!(sheets[0].rows.len(), 3);
        assert_eq!(sheets[0].rows[1][0], Cell::from("Bruno"));
        assert_eq!(sheets[1].name, "Project - Gare");
        assert_eq!(sheets[1].rows[1][0], Cell::from("Alice"));
    }

    #[test]
    fn test_timesheet_sheets_without_entries_lists_all_workers() {
        let workers = vec![worker("a", "Alice", None), worker("b", "Bruno", None)];
        let request = TimesheetRequest {
            month: july(),
            project_id: None,
            projects: &[],
            workers: &workers,
            entries: &[],
            all_entries: &[],
        };
        let sheets = timesheet_sheets(&request);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, ALL_PROJECTS_SHEET);
        assert_eq!(sheets[0].rows.len(), 4);
    }

    #[test]
    fn test_payroll_sorted_and_reconciled() {
        let a = worker("a", "Alice", Some(15.0));
        let b = worker("b", "Bruno", Some(20.0));
        let c = worker("c", "Chloé", None);
        let entries = vec![
            entry(&a, "p1", "2024-07-01", 8.0),
            entry(&b, "p1", "2024-07-01", 7.5),
            entry(&a, "p2", "2024-07-02", 4.25),
            entry(&c, "p1", "2024-07-03", 2.0),
        ];
        let rows = payroll_rows(&entries);

        assert_eq!(rows[0], cells!["Worker", "Hours", "Rate", "Amount"]);
        assert_eq!(rows[1], vec![Cell::from("Alice"), Cell::from("12:15"), Cell::Number(15.0), Cell::Number(183.75)]);
        assert_eq!(rows[2], vec![Cell::from("Bruno"), Cell::from("07:30"), Cell::Number(20.0), Cell::Number(150.0)]);
        assert_eq!(rows[3], vec![Cell::from("Chloé"), Cell::from("02:00"), Cell::Empty, Cell::Number(0.0)]);

        let amounts: Vec<f64> = rows[1..rows.len() - 1].iter().filter_map(|row| row[3].as_number()).collect();
        assert!(amounts.windows(2).all(|pair| pair[0] >= pair[1]));

        let total = rows.last().unwrap();
        assert_eq!(total[0], Cell::from(TOTAL_LABEL));
        assert_eq!(total[1], Cell::from("21:45"));
        assert_eq!(total[3], Cell::Number(round2(amounts.iter().sum())));
    }

    #[test]
    fn test_payroll_placeholder_when_empty() {
        let rows = payroll_rows(&[]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Cell::from(NO_NAME), Cell::from("00:00"), Cell::Empty, Cell::Number(0.0)]);
        assert_eq!(rows[2], vec![Cell::from(TOTAL_LABEL), Cell::from("00:00"), Cell::Empty, Cell::Number(0.0)]);
    }

    #[test]
    fn test_payroll_keeps_last_non_zero_rate() {
        let mut a = worker("a", "Alice", Some(15.0));
        let first = entry(&a, "p1", "2024-07-01", 1.0);
        a.pay_rate = Some(18.0);
        let second = entry(&a, "p1", "2024-07-02", 1.0);
        a.pay_rate = None;
        let third = entry(&a, "p1", "2024-07-03", 1.0);

        let rows = payroll_rows(&[first, second, third]);
        assert_eq!(rows[1][2], Cell::Number(18.0));
        assert_eq!(rows[1][3], Cell::Number(33.0));
    }

    #[test]
    fn test_global_month_sheets() {
        let a = worker("a", "alice", Some(10.0));
        let b = worker("b", "Bruno", None);
        let mut first = entry(&b, "p1", "2024-07-02", 3.0);
        first.note = Some(" gravel ".to_string());
        first.project = Some(Project {
            id: "p1".to_string(),
            name: "Gare".to_string(),
            ..Default::default()
        });
        let entries = vec![
            first,
            entry(&a, "p1", "2024-07-02", 4.0),
            entry(&a, "p2", "2024-07-02", 2.5),
            entry(&a, "p1", "2024-07-01", 0.0),
        ];
        let sheets = global_month_sheets(&[a, b], &entries);

        let summary = &sheets[0];
        assert_eq!(summary.name, SUMMARY_SHEET);
        assert_eq!(summary.rows.len(), 4);
        assert_eq!(
            summary.rows[1],
            vec![
                Cell::from("alice"),
                Cell::from(""),
                Cell::Number(6.5),
                Cell::Number(1.0),
                Cell::Number(10.0),
                Cell::Number(65.0)
            ]
        );
        assert_eq!(summary.rows[2][4], Cell::Empty);
        assert_eq!(
            summary.rows[3],
            vec![
                Cell::from(TOTAL_LABEL),
                Cell::from(""),
                Cell::Number(9.5),
                Cell::Number(2.0),
                Cell::Empty,
                Cell::Number(65.0)
            ]
        );

        let details = &sheets[1];
        assert_eq!(details.name, DETAILS_SHEET);
        assert_eq!(details.rows.len(), 5);
        assert_eq!(details.rows[1][0], Cell::from("2024-07-01"));
        assert_eq!(details.rows[2][1], Cell::from("alice"));
        assert_eq!(details.rows[4][1], Cell::from("Bruno"));
        assert_eq!(details.rows[4][2], Cell::from("Gare"));
        assert_eq!(details.rows[4][4], Cell::from("gravel"));
        assert_eq!(details.rows[2][2], Cell::from(NO_NAME));
    }
}

//! Backend snapshot loading and row normalization.
//!
//! The hosted backend returns joined sub-records in more than one shape: a
//! `worker` may arrive as an object, a one-element array, an empty array or
//! `null`, and numeric columns sometimes arrive as strings. All of that is
//! flattened here so the report code only sees the plain records from
//! [`crate::libs::models`].
//!
//! ## Snapshot Layout
//!
//! ```json
//! {
//!   "projects": [{ "id": "p1", "name": "Rue Victor Hugo", "bill_rate": 45 }],
//!   "workers": [{ "id": "w1", "full_name": "Alice", "pay_rate": "18,5" }],
//!   "assignments": [{ "project_id": "p1", "worker_id": "w1" }],
//!   "entries": [{
//!     "worker_id": "w1", "project_id": "p1", "work_date": "2024-07-01",
//!     "hours": 7.5, "status": "worked", "worker": [{ "id": "w1" }]
//!   }]
//! }
//! ```

use crate::libs::calendar::YearMonth;
use crate::libs::error::SnapshotError;
use crate::libs::models::{Project, ProjectWorker, TimeEntry, Worker};
use crate::libs::time::to_number;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts an embedded record as an object, an array (first element) or null.
pub fn embedded<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<OneOrMany<T>>::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::One(record)) => Some(record),
        Some(OneOrMany::Many(records)) => records.into_iter().next(),
        None => None,
    })
}

/// Reads hours given as a number, a numeric string or null (zero).
pub fn lenient_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(value)) => value,
        Some(NumberOrText::Text(text)) => to_number(&text),
        None => 0.0,
    })
}

/// Reads an optional rate given as a number or a numeric string.
pub fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(value)) => Some(value),
        Some(NumberOrText::Text(text)) if !text.trim().is_empty() => Some(to_number(&text)),
        _ => None,
    })
}

/// Everything the reports need for one owner, as exported from the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub assignments: Vec<ProjectWorker>,
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&text).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            projects = snapshot.projects.len(),
            workers = snapshot.workers.len(),
            entries = snapshot.entries.len(),
            "snapshot loaded"
        );
        Ok(snapshot.hydrate())
    }

    /// Attaches top-level worker/project records to entries that lack them.
    pub fn hydrate(mut self) -> Self {
        let workers: HashMap<&str, &Worker> = self.workers.iter().map(|w| (w.id.as_str(), w)).collect();
        let projects: HashMap<&str, &Project> = self.projects.iter().map(|p| (p.id.as_str(), p)).collect();

        for entry in &mut self.entries {
            if entry.worker.is_none() {
                entry.worker = workers.get(entry.worker_id.as_str()).map(|w| (*w).clone());
            }
            if entry.project.is_none() {
                entry.project = projects.get(entry.project_id.as_str()).map(|p| (*p).clone());
            }
        }
        self
    }

    /// Projects that are not archived.
    pub fn active_projects(&self) -> Vec<Project> {
        self.projects.iter().filter(|p| !p.archived).cloned().collect()
    }

    /// Workers that are not archived.
    pub fn active_workers(&self) -> Vec<Worker> {
        self.workers.iter().filter(|w| !w.archived).cloned().collect()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Active workers assigned to `project_id`.
    pub fn assigned_workers(&self, project_id: &str) -> Vec<Worker> {
        self.workers
            .iter()
            .filter(|w| !w.archived)
            .filter(|w| self.assignments.iter().any(|a| a.project_id == project_id && a.worker_id == w.id))
            .cloned()
            .collect()
    }

    /// Workers to list in a report: active ones plus any archived worker
    /// who still has hours in `entries`.
    pub fn report_workers(&self, entries: &[TimeEntry]) -> Vec<Worker> {
        self.workers
            .iter()
            .filter(|w| !w.archived || entries.iter().any(|e| e.worker_id == w.id))
            .cloned()
            .collect()
    }

    /// Entries of `month`, optionally restricted to one project, ordered by date.
    pub fn entries_for(&self, month: YearMonth, project_id: Option<&str>) -> Vec<TimeEntry> {
        let mut entries: Vec<TimeEntry> = self
            .entries
            .iter()
            .filter(|e| month.contains(e.work_date))
            .filter(|e| project_id.map_or(true, |id| e.project_id == id))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.work_date);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "projects": [{ "id": "p1", "name": "Gare", "bill_rate": "45,5" }],
        "workers": [
            { "id": "w1", "full_name": "Alice", "pay_rate": 20 },
            { "id": "w2", "email": "bob@x.fr", "archived": true }
        ],
        "assignments": [{ "project_id": "p1", "worker_id": "w1" }, { "project_id": "p1", "worker_id": "w2" }],
        "entries": [
            { "worker_id": "w1", "project_id": "p1", "work_date": "2024-07-02", "hours": "3,5", "status": "worked",
              "worker": [{ "id": "w1", "full_name": "Alice", "pay_rate": 20 }], "project": null },
            { "worker_id": "w2", "project_id": "p1", "work_date": "2024-07-01", "hours": 8, "status": "worked",
              "worker": [] },
            { "worker_id": "w1", "project_id": "p1", "work_date": "2024-08-01", "hours": null, "status": "absent" }
        ]
    }"#;

    fn snapshot() -> Snapshot {
        serde_json::from_str::<Snapshot>(SNAPSHOT).unwrap().hydrate()
    }

    #[test]
    fn test_embedded_shapes_are_flattened() {
        let snapshot = snapshot();
        assert_eq!(snapshot.entries[0].worker.as_ref().unwrap().full_name.as_deref(), Some("Alice"));
        // Empty array and missing records are filled in from the top-level lists.
        assert_eq!(snapshot.entries[1].worker.as_ref().unwrap().id, "w2");
        assert_eq!(snapshot.entries[0].project.as_ref().unwrap().bill_rate, Some(45.5));
    }

    #[test]
    fn test_lenient_numbers() {
        let snapshot = snapshot();
        assert_eq!(snapshot.entries[0].hours, 3.5);
        assert_eq!(snapshot.entries[2].hours, 0.0);
    }

    #[test]
    fn test_entries_for_month_sorted_by_date() {
        let snapshot = snapshot();
        let july = YearMonth::new(2024, 7).unwrap();
        let entries = snapshot.entries_for(july, Some("p1"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].worker_id, "w2");
        assert!(snapshot.entries_for(july, Some("p2")).is_empty());
    }

    #[test]
    fn test_archived_workers_are_not_active() {
        let snapshot = snapshot();
        assert_eq!(snapshot.active_workers().len(), 1);
        assert_eq!(snapshot.assigned_workers("p1").len(), 1);
    }

    #[test]
    fn test_report_workers_keep_archived_with_hours() {
        let snapshot = snapshot();
        let july = YearMonth::new(2024, 7).unwrap();
        assert_eq!(snapshot.report_workers(&snapshot.entries_for(july, None)).len(), 2);
        let august = YearMonth::new(2024, 8).unwrap();
        assert_eq!(snapshot.report_workers(&snapshot.entries_for(august, None)).len(), 1);
    }
}

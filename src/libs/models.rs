//! Records supplied by the hosted backend.
//!
//! These are read-only from the report side. Field names follow the backend's
//! column names so snapshots deserialize without renaming.

use crate::libs::snapshot::{embedded, lenient_hours, lenient_rate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder shown where no name can be resolved.
pub const NO_NAME: &str = "—";

const ID_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "lenient_rate")]
    pub bill_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rate")]
    pub default_daily_hours: Option<f64>,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_rate")]
    pub pay_rate: Option<f64>,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Worked,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub worker_id: String,
    pub project_id: String,
    pub work_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub hours: f64,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default)]
    pub note: Option<String>,
    /// Joined worker record, when the query embedded it.
    #[serde(default, deserialize_with = "embedded", skip_serializing_if = "Option::is_none")]
    pub worker: Option<Worker>,
    /// Joined project record, when the query embedded it.
    #[serde(default, deserialize_with = "embedded", skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWorker {
    pub project_id: String,
    pub worker_id: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn id_prefix(id: &str) -> String {
    id.chars().take(ID_PREFIX_LEN).collect()
}

impl Worker {
    /// Name shown in reports: full name, else email, else the id prefix.
    pub fn display_name(&self) -> String {
        non_blank(self.full_name.as_deref())
            .or_else(|| non_blank(self.email.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| id_prefix(&self.id))
    }

    pub fn contact_email(&self) -> String {
        non_blank(self.email.as_deref()).unwrap_or_default().to_string()
    }

    pub fn rate(&self) -> f64 {
        self.pay_rate.filter(|rate| rate.is_finite()).unwrap_or(0.0)
    }
}

impl Project {
    /// Trimmed project name, `None` when blank.
    pub fn label(&self) -> Option<&str> {
        non_blank(Some(&self.name))
    }

    pub fn rate(&self) -> f64 {
        self.bill_rate.filter(|rate| rate.is_finite()).unwrap_or(0.0)
    }
}

impl TimeEntry {
    /// Worked hours, with non-finite values read as zero.
    pub fn hours(&self) -> f64 {
        if self.hours.is_finite() {
            self.hours
        } else {
            0.0
        }
    }

    pub fn worker_rate(&self) -> f64 {
        self.worker.as_ref().map(Worker::rate).unwrap_or(0.0)
    }

    pub fn project_rate(&self) -> f64 {
        self.project.as_ref().map(Project::rate).unwrap_or(0.0)
    }

    /// Display name of the embedded worker, `"—"` when none is embedded.
    pub fn worker_name(&self) -> String {
        match &self.worker {
            Some(worker) => {
                let name = worker.display_name();
                if name.is_empty() {
                    NO_NAME.to_string()
                } else {
                    name
                }
            }
            None => NO_NAME.to_string(),
        }
    }

    pub fn project_name(&self) -> String {
        self.project.as_ref().and_then(Project::label).unwrap_or(NO_NAME).to_string()
    }

    pub fn note_text(&self) -> String {
        non_blank(self.note.as_deref()).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(full_name: Option<&str>, email: Option<&str>) -> Worker {
        Worker {
            id: "0123456789abcdef".to_string(),
            full_name: full_name.map(str::to_string),
            email: email.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_precedence() {
        assert_eq!(worker(Some("Alice Martin"), Some("a@x.fr")).display_name(), "Alice Martin");
        assert_eq!(worker(None, Some("a@x.fr")).display_name(), "a@x.fr");
        assert_eq!(worker(Some("  "), Some(" a@x.fr ")).display_name(), "a@x.fr");
        assert_eq!(worker(None, None).display_name(), "01234567");
    }

    #[test]
    fn test_entry_fallbacks() {
        let entry = TimeEntry {
            worker_id: "w1".to_string(),
            project_id: "p1".to_string(),
            work_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            hours: f64::NAN,
            status: EntryStatus::Worked,
            note: Some("  ".to_string()),
            worker: None,
            project: None,
        };
        assert_eq!(entry.hours(), 0.0);
        assert_eq!(entry.worker_name(), NO_NAME);
        assert_eq!(entry.project_name(), NO_NAME);
        assert_eq!(entry.note_text(), "");
        assert_eq!(entry.worker_rate(), 0.0);
    }
}

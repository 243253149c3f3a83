//! Month arithmetic for timesheet periods.
//!
//! Reports are always produced for a calendar month identified as `YYYY-MM`.
//! This module resolves the first/last day of such a period, the labels used
//! as timesheet column headers and month navigation.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::libs::messages::Message;
use crate::msg_error_anyhow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Inclusive date range of a month plus its day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: u32,
}

impl YearMonth {
    /// Creates a period, returning `None` for a month outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Moves the period by `delta` months, crossing year boundaries.
    ///
    /// ```rust
    /// use chronix::libs::calendar::YearMonth;
    ///
    /// let jan = YearMonth::new(2025, 1).unwrap();
    /// assert_eq!(jan.shift(-1).to_string(), "2024-12");
    /// assert_eq!(jan.shift(13).to_string(), "2026-02");
    /// ```
    pub fn shift(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn bounds(&self) -> MonthBounds {
        let from = self.first_day();
        let next = self.shift(1).first_day();
        let to = next.pred_opt().unwrap_or(from);
        MonthBounds { from, to, days: to.day() }
    }

    pub fn days(&self) -> u32 {
        self.bounds().days
    }

    /// The date of `day` within this month, `None` when out of range.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short weekday name of `day` in this month.
    pub fn weekday_label(&self, day: u32) -> Option<&'static str> {
        self.date(day).map(|date| weekday_short(date.weekday()))
    }

    /// Column labels for every day of the month, e.g. `"1 Mon"`.
    pub fn day_labels(&self) -> Vec<String> {
        (1..=self.days())
            .filter_map(|day| self.weekday_label(day).map(|weekday| format!("{} {}", day, weekday)))
            .collect()
    }
}

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    /// Accepts `YYYY-MM` and the keyword `current`.
    fn from_str(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("current") {
            return Ok(Self::current());
        }

        let parsed = value
            .split_once('-')
            .and_then(|(year, month)| Some((year.parse::<i32>().ok()?, month.parse::<u32>().ok()?)))
            .and_then(|(year, month)| Self::new(year, month));

        parsed.ok_or_else(|| msg_error_anyhow!(Message::InvalidPeriod(value.to_string())))
    }
}

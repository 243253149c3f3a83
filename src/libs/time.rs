//! Time value normalization between decimal hours and "HH:MM" strings.
//!
//! Chronix stores worked time as decimal hours (`7.5`) and shows it as a
//! clock-style string (`"07:30"`). Decimal hours are the arithmetic form used
//! for totals and rate multiplication; the clock form is what users type into
//! the timesheet grid and what the exported sheets display.
//!
//! ## Format Specifications
//!
//! - Hours are zero-padded to at least 2 digits and never wrap at 24
//! - Minutes are always 2 digits in `00..=59`
//! - Decimal hours parsed from user input are clamped to `[0, 24]`
//! - Sums of clock values are not clamped, monthly totals exceed one day
//!
//! ## Examples
//!
//! ```rust
//! use chronix::libs::time::{clock_to_decimal, decimal_to_clock, sum_clock_values};
//!
//! assert_eq!(decimal_to_clock(Some(7.5)), "07:30");
//! assert_eq!(clock_to_decimal("07:30"), 7.5);
//! assert_eq!(sum_clock_values(&["23:00", "23:00"]), "46:00");
//! ```
//!
//! All functions here are total: malformed input is normalized to a safe
//! default (`0` or an empty string) and never reported as an error.

/// Upper bound for a single day's worth of hours.
pub const MAX_DAILY_HOURS: f64 = 24.0;

const MAX_REPAIRED_HOUR: u64 = 23;
const MAX_REPAIRED_MINUTE: u64 = 59;

/// Formats a number of minutes as `HH:MM` with unbounded hours.
fn format_minutes(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Formats a non-negative decimal hour quantity as `HH:MM`.
///
/// Unlike [`decimal_to_clock`], zero is rendered as `"00:00"`. Total minutes
/// are rounded to the nearest integer.
pub fn clock_from_decimal(hours: f64) -> String {
    if !hours.is_finite() {
        return format_minutes(0);
    }
    format_minutes((hours * 60.0).round() as i64)
}

/// Converts decimal hours to the display form used in timesheet cells.
///
/// Returns an empty string for `None`, zero, negative or non-finite input so
/// that days without work render as blank cells.
///
/// # Examples
///
/// ```rust
/// use chronix::libs::time::decimal_to_clock;
///
/// assert_eq!(decimal_to_clock(Some(1.5)), "01:30");
/// assert_eq!(decimal_to_clock(Some(30.0)), "30:00");
/// assert_eq!(decimal_to_clock(Some(0.0)), "");
/// assert_eq!(decimal_to_clock(None), "");
/// ```
pub fn decimal_to_clock(hours: Option<f64>) -> String {
    match hours {
        Some(hours) if hours.is_finite() && hours > 0.0 => clock_from_decimal(hours),
        _ => String::new(),
    }
}

/// Parses a leading integer the way a lenient form field does.
///
/// Leading whitespace and one sign are accepted, digits are read until the
/// first non-digit. Returns `None` when no digit was found.
fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Parses a locale-tolerant number, accepting `,` as the decimal separator.
///
/// Empty input is `0`, unparseable or non-finite input is `0` as well.
///
/// ```rust
/// use chronix::libs::time::to_number;
///
/// assert_eq!(to_number("7,5"), 7.5);
/// assert_eq!(to_number(" 8 "), 8.0);
/// assert_eq!(to_number("eight"), 0.0);
/// ```
pub fn to_number(text: &str) -> f64 {
    let normalized = text.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return 0.0;
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn clamp_daily(hours: f64) -> f64 {
    if hours.is_nan() {
        return 0.0;
    }
    hours.clamp(0.0, MAX_DAILY_HOURS)
}

/// Converts a clock string or a plain number to decimal hours in `[0, 24]`.
///
/// With a colon, `H` and `M` are read as integers (missing or unparseable
/// parts count as zero) and combined as `H + M / 60`. Without a colon the
/// text is read with [`to_number`]. The result is always clamped.
///
/// ```rust
/// use chronix::libs::time::clock_to_decimal;
///
/// assert_eq!(clock_to_decimal("01:30"), 1.5);
/// assert_eq!(clock_to_decimal("7,5"), 7.5);
/// assert_eq!(clock_to_decimal("25:00"), 24.0);
/// assert_eq!(clock_to_decimal("-5"), 0.0);
/// assert_eq!(clock_to_decimal(""), 0.0);
/// ```
pub fn clock_to_decimal(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    if text.contains(':') {
        let mut parts = text.split(':');
        let hours = parts.next().and_then(parse_int_prefix).unwrap_or(0);
        let minutes = parts.next().and_then(parse_int_prefix).unwrap_or(0);
        return clamp_daily(hours as f64 + minutes as f64 / 60.0);
    }

    clamp_daily(to_number(text))
}

/// Sums clock strings into one unbounded `HH:MM` total.
///
/// Empty strings are skipped and unparseable hour or minute parts count as
/// zero. Individual values are not clamped, so `["23:00", "23:00"]` yields
/// `"46:00"`. An empty input sums to `"00:00"`.
pub fn sum_clock_values<S: AsRef<str>>(values: &[S]) -> String {
    let total_minutes: i64 = values
        .iter()
        .map(|value| value.as_ref())
        .filter(|value| !value.is_empty())
        .map(|value| {
            let mut parts = value.split(':');
            let hours = parts.next().and_then(parse_int_prefix).unwrap_or(0);
            let minutes = parts.next().and_then(parse_int_prefix).unwrap_or(0);
            hours.saturating_mul(60).saturating_add(minutes)
        })
        .fold(0i64, i64::saturating_add);

    format_minutes(total_minutes)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Normalizes text while a user is typing into a time cell.
///
/// - `"9"` becomes `"9:00"`, with the hour clamped to 23
/// - `"9:5"` or `"9:"` become `"9:05"` / `"9:00"`, hour clamped to 23 and
///   minutes clamped to 59
/// - anything else is returned unchanged and must be treated as invalid
///
/// ```rust
/// use chronix::libs::time::repair_clock_input;
///
/// assert_eq!(repair_clock_input("9"), "9:00");
/// assert_eq!(repair_clock_input("25"), "23:00");
/// assert_eq!(repair_clock_input("9:5"), "9:05");
/// assert_eq!(repair_clock_input("abc"), "abc");
/// ```
pub fn repair_clock_input(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    if is_digits(text) {
        let hours = text.parse::<u64>().map_or(MAX_REPAIRED_HOUR, |h| h.min(MAX_REPAIRED_HOUR));
        return format!("{}:00", hours);
    }

    if let Some((h, m)) = text.split_once(':') {
        let valid = (1..=2).contains(&h.len()) && is_digits(h) && m.len() <= 2 && (m.is_empty() || is_digits(m));
        if valid {
            let hours = h.parse::<u64>().unwrap_or(0).min(MAX_REPAIRED_HOUR);
            let minutes = m.parse::<u64>().unwrap_or(0).min(MAX_REPAIRED_MINUTE);
            return format!("{}:{:02}", hours, minutes);
        }
    }

    text.to_string()
}

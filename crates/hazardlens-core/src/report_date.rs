//! Submission dates and report ages.
//!
//! Reports carry their submission date as displayed to site staff:
//! `DD Mon YYYY` with Indonesian month abbreviations.
//!
//! # Month abbreviations
//!
//! Jan Feb Mar Apr Mei Jun Jul Agu Sep Okt Nov Des. English spellings of
//! the four months that differ (May, Aug, Oct, Dec) are accepted too.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("mei", 5),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("agu", 8),
    ("aug", 8),
    ("sep", 9),
    ("okt", 10),
    ("oct", 10),
    ("nov", 11),
    ("des", 12),
    ("dec", 12),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportDateError {
    #[error("expected `DD Mon YYYY`, got {0:?}")]
    Malformed(String),
    #[error("unknown month {0:?}")]
    UnknownMonth(String),
    #[error("no such calendar date: {0:?}")]
    OutOfRange(String),
}

/// Parse a submission date such as `03 Des 2025`.
pub fn parse_report_date(s: &str) -> Result<NaiveDate, ReportDateError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(ReportDateError::Malformed(s.to_string()));
    };

    let day: u32 = day
        .parse()
        .map_err(|_| ReportDateError::Malformed(s.to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| ReportDateError::Malformed(s.to_string()))?;

    let key = month.to_ascii_lowercase();
    let key = key.get(..3).unwrap_or(&key);
    let month = MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, m)| *m)
        .ok_or_else(|| ReportDateError::UnknownMonth(month.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ReportDateError::OutOfRange(s.to_string()))
}

/// Queue ordering instant for a report: the ISO timestamp when present,
/// otherwise midnight UTC of the submission date.
pub fn report_instant(timestamp: Option<&str>, date: &str) -> Option<DateTime<Utc>> {
    if let Some(ts) = timestamp
        && let Ok(parsed) = DateTime::parse_from_rfc3339(ts)
    {
        return Some(parsed.with_timezone(&Utc));
    }
    parse_report_date(date)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Whole days between a submission date and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAge {
    Today,
    Days(u32),
}

impl fmt::Display for ReportAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Days(1) => f.write_str("1 day ago"),
            Self::Days(n) => write!(f, "{n} days ago"),
        }
    }
}

/// Age of a report submitted on `date`, as seen on `today`.
///
/// The difference is absolute, so a date after `today` is reported the
/// same way as one before it.
pub fn report_age(date: NaiveDate, today: NaiveDate) -> ReportAge {
    let days = (today - date).num_days().unsigned_abs();
    match days {
        0 => ReportAge::Today,
        n => ReportAge::Days(u32::try_from(n).unwrap_or(u32::MAX)),
    }
}

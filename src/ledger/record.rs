use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One of the four rolling windows an accumulator covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    Day,
    Week,
    Month,
    Year,
}

impl Window {
    pub const ALL: [Window; 4] = [Window::Year, Window::Month, Window::Week, Window::Day];

    pub fn label(&self) -> &'static str {
        match self {
            Window::Day => "Today",
            Window::Week => "This week",
            Window::Month => "This month",
            Window::Year => "This year",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Window::Day => "day",
            Window::Week => "week",
            Window::Month => "month",
            Window::Year => "year",
        };
        f.write_str(name)
    }
}

/// Read-only copy of the four running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub year: i64,
    pub month: i64,
    pub week: i64,
    pub day: i64,
}

impl Totals {
    pub fn get(&self, window: Window) -> i64 {
        match window {
            Window::Day => self.day,
            Window::Week => self.week,
            Window::Month => self.month,
            Window::Year => self.year,
        }
    }
}

/// Running spend totals plus the moment they were last evaluated.
///
/// Week and month windows are independent, so `week_total` may exceed
/// `month_total` shortly after a month boundary that falls mid-week. Only the
/// year total bounds every other total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatorRecord {
    pub year_total: i64,
    pub month_total: i64,
    pub week_total: i64,
    pub day_total: i64,
    pub last_update: NaiveDateTime,
}

impl AccumulatorRecord {
    /// Zero totals stamped with `now`.
    pub fn fresh(now: NaiveDateTime) -> Self {
        Self {
            year_total: 0,
            month_total: 0,
            week_total: 0,
            day_total: 0,
            last_update: now,
        }
    }

    pub fn totals(&self) -> Totals {
        Totals {
            year: self.year_total,
            month: self.month_total,
            week: self.week_total,
            day: self.day_total,
        }
    }

    pub fn clear(&mut self, window: Window) {
        match window {
            Window::Day => self.day_total = 0,
            Window::Week => self.week_total = 0,
            Window::Month => self.month_total = 0,
            Window::Year => self.year_total = 0,
        }
    }

    /// Adds `amount` to every total. Either all four totals change or none do.
    pub fn add(&mut self, amount: i64) -> Result<Totals> {
        let overflow = || TrackerError::AmountOverflow { amount };
        let year = self.year_total.checked_add(amount).ok_or_else(overflow)?;
        let month = self.month_total.checked_add(amount).ok_or_else(overflow)?;
        let week = self.week_total.checked_add(amount).ok_or_else(overflow)?;
        let day = self.day_total.checked_add(amount).ok_or_else(overflow)?;
        self.year_total = year;
        self.month_total = month;
        self.week_total = week;
        self.day_total = day;
        Ok(self.totals())
    }

    pub fn to_snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            expense_year: self.year_total,
            expense_month: self.month_total,
            expense_week: self.week_total,
            expense_day: self.day_total,
            last_update: Some(format_timestamp(self.last_update)),
        }
    }
}

/// On-disk shape of an [`AccumulatorRecord`].
///
/// Missing totals decode as zero. A missing or empty `last_update` is left for
/// the caller to fill with the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(default)]
    pub expense_year: i64,
    #[serde(default)]
    pub expense_month: i64,
    #[serde(default)]
    pub expense_week: i64,
    #[serde(default)]
    pub expense_day: i64,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl RecordSnapshot {
    /// Builds the in-memory record, rejecting a timestamp that does not parse.
    pub fn into_record(self, now: NaiveDateTime) -> Result<AccumulatorRecord> {
        let last_update = match self.last_update.as_deref().map(str::trim) {
            None | Some("") => now,
            Some(raw) => parse_timestamp(raw)?,
        };
        Ok(AccumulatorRecord {
            year_total: self.expense_year,
            month_total: self.expense_month,
            week_total: self.expense_week,
            day_total: self.expense_day,
            last_update,
        })
    }
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses an ISO-8601 local timestamp.
///
/// Accepts `T` or space separators, a bare date (midnight), and RFC 3339 input
/// whose offset is dropped in favour of its wall-clock part.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(value) = raw.parse::<NaiveDateTime>() {
        return Ok(value);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(value);
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(value.naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }
    Err(TrackerError::InvalidRecord(format!(
        "`{raw}` is not an ISO-8601 timestamp"
    )))
}

use chrono::{Datelike, NaiveDateTime};
use tracing::{debug, warn};

use super::record::{AccumulatorRecord, Window};

/// Outcome of a single rollover evaluation.
///
/// Tiers are mutually exclusive and checked from the most significant unit down;
/// the first one that matches decides what is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    Year,
    Month,
    Week,
    Day,
    None,
}

impl Rollover {
    /// Windows reset by this outcome.
    pub fn cleared(&self) -> &'static [Window] {
        match self {
            Rollover::Year => &[Window::Year, Window::Month, Window::Week, Window::Day],
            Rollover::Month => &[Window::Month],
            Rollover::Week => &[Window::Week],
            Rollover::Day => &[Window::Day],
            Rollover::None => &[],
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Rollover::None)
    }
}

/// Decides which accumulators are stale relative to the current time and clears them.
pub struct RolloverEngine;

impl RolloverEngine {
    /// Pure tier selection between the last recorded update and `now`.
    pub fn evaluate(last: NaiveDateTime, now: NaiveDateTime) -> Rollover {
        if now.year() > last.year() {
            Rollover::Year
        } else if now.month() > last.month() {
            Rollover::Month
        } else if Self::week_wrapped(last, now) {
            Rollover::Week
        } else if now.day() > last.day() {
            Rollover::Day
        } else {
            Rollover::None
        }
    }

    /// Clears the stale totals of `record` and stamps it with `now`.
    pub fn apply(record: &mut AccumulatorRecord, now: NaiveDateTime) -> Rollover {
        if now < record.last_update {
            warn!(
                last_update = %record.last_update,
                now = %now,
                "clock is behind the last recorded update"
            );
        }
        let outcome = Self::evaluate(record.last_update, now);
        for window in outcome.cleared() {
            record.clear(*window);
        }
        if !outcome.is_none() {
            debug!(?outcome, last_update = %record.last_update, now = %now, "rollover applied");
        }
        record.last_update = now;
        outcome
    }

    // Weeks start on Monday: a smaller weekday index means a Monday was passed. The
    // day-of-month gap catches a jump landing on the same weekday.
    fn week_wrapped(last: NaiveDateTime, now: NaiveDateTime) -> bool {
        let now_index = now.weekday().num_days_from_monday();
        let last_index = last.weekday().num_days_from_monday();
        let day_gap = i64::from(now.day()) - i64::from(last.day());
        now_index < last_index || day_gap >= 7
    }
}

use std::fmt;

use chrono::NaiveDate;

use crate::ledger::{Rollover, Totals, Window};

/// Per-window totals prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsSummary {
    pub date: NaiveDate,
    pub currency: String,
    pub rows: Vec<(Window, i64)>,
}

impl fmt::Display for TotalsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|(window, _)| window.label().len())
            .max()
            .unwrap_or(0);
        for (idx, (window, amount)) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<width$}  {} {}",
                format!("{}:", window.label()),
                amount,
                self.currency,
                width = width + 1
            )?;
        }
        Ok(())
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Orders totals from the widest window to the narrowest.
    pub fn summarize(totals: Totals, date: NaiveDate, currency: &str) -> TotalsSummary {
        TotalsSummary {
            date,
            currency: currency.to_string(),
            rows: Window::ALL
                .iter()
                .map(|window| (*window, totals.get(*window)))
                .collect(),
        }
    }

    /// One-line note describing what a rollover reset, if anything.
    pub fn describe_rollover(rollover: Rollover) -> Option<String> {
        let cleared = rollover.cleared();
        if cleared.is_empty() {
            return None;
        }
        let names: Vec<String> = cleared.iter().map(|window| window.to_string()).collect();
        Some(format!(
            "New {} started; reset {} total(s).",
            rollover_unit(rollover),
            names.join(", ")
        ))
    }
}

fn rollover_unit(rollover: Rollover) -> &'static str {
    match rollover {
        Rollover::Year => "year",
        Rollover::Month => "month",
        Rollover::Week => "week",
        Rollover::Day => "day",
        Rollover::None => "period",
    }
}

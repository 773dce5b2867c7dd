//! The inclusive date window of an analysis run.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrendError;

/// Date format shared by CLI arguments, filenames and score tables.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive `[start, end]` calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// Create a window, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TrendError> {
        if end < start {
            return Err(TrendError::Config(format!(
                "end_date {end} is earlier than start_date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, TrendError> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        Self::new(start, end)
    }

    /// Whether `date` lies inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the inclusive range `[from, to]` shares at least one day with the window.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        to >= self.start && from <= self.end
    }
}

impl fmt::Display for AnalysisWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, TrendError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        TrendError::Config(format!(
            "{field} '{value}' is not a valid YYYY-MM-DD date: {e}"
        ))
    })
}

//! Filename-encoded document dates.
//!
//! Documents are named `YYYY-MM-DD_<rank>` followed by any extension chain
//! (`2024-01-15_3.txt`, `2024-01-15_3.txt.vec`). The vector loader and the
//! trend walk both date documents through [`DocumentName::parse`], so the two
//! can never disagree about which documents fall inside a window.

use std::borrow::Borrow;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::window::DATE_FORMAT;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})_(\d+)").expect("document name pattern is valid")
    })
}

/// Date and per-day rank parsed from a document filename.
///
/// The rank is kept as the matched digit string: it only identifies the
/// document, so any length of digits is accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentName {
    pub date: NaiveDate,
    pub rank: String,
}

impl DocumentName {
    /// Parse a bare file name. Returns `None` when the name does not start
    /// with `YYYY-MM-DD_<digits>` or the date is not a real calendar day.
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = name_pattern().captures(file_name)?;
        let date = NaiveDate::parse_from_str(&caps[1], DATE_FORMAT).ok()?;
        let rank = caps[2].to_string();
        Some(Self { date, rank })
    }

    /// Parse the final component of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::parse)
    }

    /// The `YYYY-MM` bucket this document belongs to.
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// Calendar month bucket, rendered as `YYYY-MM`.
///
/// Ordering is lexicographic on the rendered form, which is chronological
/// for four-digit years.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MonthKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

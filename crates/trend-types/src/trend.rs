//! Month-bucketed score series and the growth metric.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::MonthKey;

/// Growth between the first and last populated month.
///
/// Relative change `(last - first) / first` when the baseline is positive.
/// With a zero baseline the absolute `last` is returned instead, so the two
/// cases are on different scales.
pub fn growth(first: f64, last: f64) -> f64 {
    if first > 0.0 {
        (last - first) / first
    } else {
        last
    }
}

/// Accumulated score per calendar month for one term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermMonthSeries {
    months: BTreeMap<MonthKey, f64>,
}

impl TermMonthSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `score` to the bucket for `month`, creating it if needed.
    ///
    /// A zero score still populates the month.
    pub fn add(&mut self, month: MonthKey, score: f64) {
        *self.months.entry(month).or_insert(0.0) += score;
    }

    /// Fold another series into this one.
    pub fn merge(&mut self, other: TermMonthSeries) {
        for (month, score) in other.months {
            self.add(month, score);
        }
    }

    pub fn get(&self, month: &str) -> Option<f64> {
        self.months.get(month).copied()
    }

    /// Score at the chronologically earliest populated month.
    pub fn first(&self) -> Option<f64> {
        self.months.values().next().copied()
    }

    /// Score at the chronologically latest populated month.
    pub fn last(&self) -> Option<f64> {
        self.months.values().next_back().copied()
    }

    /// Growth of this series, `None` when no month is populated.
    pub fn growth(&self) -> Option<f64> {
        Some(growth(self.first()?, self.last()?))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, f64)> {
        self.months.iter().map(|(m, s)| (m, *s))
    }
}

impl FromIterator<(MonthKey, f64)> for TermMonthSeries {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (month, score) in iter {
            series.add(month, score);
        }
        series
    }
}

/// Trend of a single candidate term over the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub term: String,
    pub growth: f64,
    pub months: TermMonthSeries,
}

impl TrendResult {
    /// Build a result from a populated series; `None` for an empty one.
    pub fn from_series(term: impl Into<String>, months: TermMonthSeries) -> Option<Self> {
        let growth = months.growth()?;
        Some(Self {
            term: term.into(),
            growth,
            months,
        })
    }

    /// Sort by growth descending, ties by term ascending.
    pub fn rank(results: &mut [TrendResult]) {
        results.sort_by(|a, b| {
            b.growth
                .total_cmp(&a.growth)
                .then_with(|| a.term.cmp(&b.term))
        });
    }
}

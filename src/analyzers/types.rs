//! Data types used by the aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::times::{MINUTE_SECONDS, format_threshold_label};

pub const DATE_HEADER: &str = "Date";
pub const VENUE_HEADER: &str = "Venue";
pub const COUNTRY_HEADER: &str = "Country";
pub const FASTEST_HEADER: &str = "Fastest";

/// Leading report columns, in display order.
pub const BASE_COLUMNS: [&str; 4] = [DATE_HEADER, VENUE_HEADER, COUNTRY_HEADER, FASTEST_HEADER];

/// A minute boundary; a time counts towards it when strictly faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Threshold(pub u32);

impl Threshold {
    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn seconds(self) -> u64 {
        u64::from(self.0) * u64::from(MINUTE_SECONDS)
    }

    pub fn admits(self, time_seconds: u32) -> bool {
        u64::from(time_seconds) < self.seconds()
    }

    pub fn label(self) -> String {
        format_threshold_label(self.0)
    }
}

/// Contiguous, strictly increasing minute boundaries derived from one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdSet {
    pub(crate) thresholds: Vec<Threshold>,
}

impl ThresholdSet {
    pub fn as_slice(&self) -> &[Threshold] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn first(&self) -> Option<Threshold> {
        self.thresholds.first().copied()
    }

    pub fn last(&self) -> Option<Threshold> {
        self.thresholds.last().copied()
    }

    pub fn labels(&self) -> Vec<String> {
        self.thresholds.iter().map(|t| t.label()).collect()
    }
}

/// Grouping key of an aggregated row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub venue: String,
    pub country: String,
}

/// Per-group summary: fastest time and how many results beat each threshold.
///
/// `bucket_counts[i]` belongs to the `i`-th threshold of the batch's [`ThresholdSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub date: NaiveDate,
    pub venue: String,
    pub country: String,
    pub fastest_seconds: u32,
    pub bucket_counts: Vec<usize>,
}

/// One display row of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(skip)]
    pub day: NaiveDate,
    pub date: String,
    pub venue: String,
    pub country: String,
    pub fastest: String,
    pub counts: Vec<usize>,
}

impl ReportRow {
    /// Cells in column order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.date.clone(),
            self.venue.clone(),
            self.country.clone(),
            self.fastest.clone(),
        ];
        cells.extend(self.counts.iter().map(usize::to_string));
        cells
    }
}

/// Sorted, display-ready report: `Date, Venue, Country, Fastest`, then one
/// column per threshold in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// The "nothing to report" table: base columns, no rows.
    pub fn empty() -> Self {
        ReportTable {
            columns: BASE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Earliest and latest race day in the report.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.day).min()?;
        let max = self.rows.iter().map(|r| r.day).max()?;
        Some((min, max))
    }
}

use std::cmp::Ordering;

use crate::analyzers::types::{AggregatedRow, BASE_COLUMNS, ReportRow, ReportTable, ThresholdSet};
use crate::times::format_seconds;

pub const REPORT_DATE_FORMAT: &str = "%d %b %Y";

/// Deepest fields first: each bucket count descending, strictest bucket
/// first, then fastest time ascending.
fn by_depth(a: &AggregatedRow, b: &AggregatedRow) -> Ordering {
    b.bucket_counts
        .cmp(&a.bucket_counts)
        .then_with(|| a.fastest_seconds.cmp(&b.fastest_seconds))
}

/// Sorts aggregated rows and projects them into the display table.
///
/// The sort is stable, so rows equal on every key keep their input order.
pub fn present(mut rows: Vec<AggregatedRow>, thresholds: &ThresholdSet) -> ReportTable {
    rows.sort_by(by_depth);

    let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    columns.extend(thresholds.labels());

    let rows = rows
        .into_iter()
        .map(|row| ReportRow {
            day: row.date,
            date: row.date.format(REPORT_DATE_FORMAT).to_string(),
            venue: row.venue,
            country: row.country,
            fastest: format_seconds(row.fastest_seconds),
            counts: row.bucket_counts,
        })
        .collect();

    ReportTable { columns, rows }
}

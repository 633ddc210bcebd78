//! Venue/date depth analysis.
//!
//! This module derives per-batch minute thresholds from the spread of
//! times, counts how many results at each race beat every threshold, and
//! sorts the races into a display-ready [`ReportTable`](types::ReportTable).

pub mod aggregate;
pub mod present;
pub mod thresholds;
pub mod types;

use tracing::{info, warn};

use crate::error::Result;
use crate::parser::{NormalizeOptions, RawRow, normalize_rows};
use aggregate::aggregate_results;
use present::present;
use thresholds::derive_thresholds;
use types::ReportTable;

/// Runs the whole pipeline over a batch of scraped rows.
///
/// An input with no timed rows yields [`ReportTable::empty`], not an error.
///
/// # Errors
///
/// Propagates batch-level failures from [`normalize_rows`].
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn build_report(rows: &[RawRow], options: &NormalizeOptions) -> Result<ReportTable> {
    let results = normalize_rows(rows, options)?;

    let times: Vec<u32> = results.iter().map(|r| r.time_seconds).collect();
    let Some(thresholds) = derive_thresholds(&times) else {
        warn!("No timed results in batch, nothing to report");
        return Ok(ReportTable::empty());
    };

    let aggregated = aggregate_results(&results, &thresholds);
    let table = present(aggregated, &thresholds);

    info!(
        results = results.len(),
        groups = table.len(),
        thresholds = thresholds.len(),
        "Report built"
    );

    Ok(table)
}

//! Ingestion of scraped ranking rows and their normalization into results.

use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RankingError, Result};
use crate::times::parse_time;

pub const VENUE_COLUMN: &str = "Venue";
pub const PERF_COLUMN: &str = "Perf";
pub const DATE_COLUMN: &str = "Date";

pub const DEFAULT_COUNTRY: &str = "UK";
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %y";

/// One row of the ranking table as scraped, before any cleaning.
///
/// `venue` may carry a trailing country after a comma, e.g. `"Parliament Hill, GB"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Venue")]
    pub venue: String,
    #[serde(rename = "Perf")]
    pub perf: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl RawRow {
    pub fn new(venue: &str, perf: &str, date: &str) -> Self {
        RawRow {
            venue: venue.to_string(),
            perf: perf.to_string(),
            date: date.to_string(),
        }
    }
}

/// A single timed performance with its grouping keys resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResult {
    pub date: NaiveDate,
    pub venue: String,
    pub country: String,
    pub time_seconds: u32,
}

/// Knobs for [`normalize_rows`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Country used when the venue has no `, COUNTRY` suffix.
    pub default_country: String,
    /// `chrono` format of the scraped date column.
    pub date_format: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            default_country: DEFAULT_COUNTRY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Reads a headed CSV ranking table into [`RawRow`]s.
///
/// Columns are located by header name; anything besides `Venue`, `Perf` and
/// `Date` is ignored. Short rows yield empty cells.
///
/// # Errors
///
/// Returns [`RankingError::MissingField`] when one of the three columns is
/// absent, and [`RankingError::Csv`] on reader failures.
pub fn read_raw_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(RankingError::MissingField(name))
    };

    let venue_idx = column(VENUE_COLUMN)?;
    let perf_idx = column(PERF_COLUMN)?;
    let date_idx = column(DATE_COLUMN)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(RawRow {
            venue: cell(venue_idx),
            perf: cell(perf_idx),
            date: cell(date_idx),
        });
    }

    debug!(rows = rows.len(), "Read raw ranking rows");
    Ok(rows)
}

/// Splits `"Venue, Country"` on the first comma, falling back to `default_country`.
pub fn split_venue(raw: &str, default_country: &str) -> (String, String) {
    match raw.split_once(',') {
        Some((venue, country)) => (venue.to_string(), country.trim().to_string()),
        None => (raw.to_string(), default_country.trim().to_string()),
    }
}

/// Turns raw rows into [`NormalizedResult`]s.
///
/// Rows whose `perf` is not a clock time are dropped. A date that does not
/// match `options.date_format` on a kept row fails the whole batch.
///
/// # Errors
///
/// Returns [`RankingError::InvalidDate`] with the 1-based row number.
pub fn normalize_rows(rows: &[RawRow], options: &NormalizeOptions) -> Result<Vec<NormalizedResult>> {
    let mut results = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        let time_seconds = match parse_time(row.perf.trim()) {
            Ok(seconds) => seconds,
            Err(e) => {
                debug!(row = idx + 1, error = %e, "Dropping untimed row");
                dropped += 1;
                continue;
            }
        };

        let (venue, country) = split_venue(&row.venue, &options.default_country);

        let date = NaiveDate::parse_from_str(row.date.trim(), &options.date_format).map_err(|_| {
            RankingError::InvalidDate {
                row: idx + 1,
                value: row.date.clone(),
            }
        })?;

        results.push(NormalizedResult {
            date,
            venue,
            country,
            time_seconds,
        });
    }

    debug!(kept = results.len(), dropped, "Normalized ranking rows");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(rows: &[RawRow]) -> Result<Vec<NormalizedResult>> {
        normalize_rows(rows, &NormalizeOptions::default())
    }

    #[test]
    fn test_split_venue_with_country() {
        assert_eq!(
            split_venue("Parliament Hill, GB", "UK"),
            ("Parliament Hill".to_string(), "GB".to_string())
        );
    }

    #[test]
    fn test_split_venue_only_first_comma() {
        let (venue, country) = split_venue("Valencia, ESP, extra", "UK");
        assert_eq!(venue, "Valencia");
        assert_eq!(country, "ESP, extra");
    }

    #[test]
    fn test_split_venue_trailing_comma_keeps_empty_country() {
        let (venue, country) = split_venue("Hyde Park,", "UK");
        assert_eq!(venue, "Hyde Park");
        assert_eq!(country, "");
    }

    #[test]
    fn test_split_venue_defaults_country() {
        assert_eq!(
            split_venue("Battersea Park", "UK"),
            ("Battersea Park".to_string(), "UK".to_string())
        );
    }

    #[test]
    fn test_normalize_valid_row() {
        let rows = vec![RawRow::new("Parliament Hill, GB", "27:57", "01 Jan 24")];
        let results = normalize(&rows).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].venue, "Parliament Hill");
        assert_eq!(results[0].country, "GB");
        assert_eq!(results[0].time_seconds, 1677);
        assert_eq!(results[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_normalize_drops_untimed_rows() {
        let rows = vec![
            RawRow::new("Battersea Park", "abc", "02 Jan 24"),
            RawRow::new("Battersea Park", "DNF", "not a date"),
            RawRow::new("Battersea Park", "31:10", "02 Jan 24"),
        ];
        let results = normalize(&rows).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].time_seconds, 1870);
    }

    #[test]
    fn test_normalize_invalid_date_fails_batch() {
        let rows = vec![
            RawRow::new("Battersea Park", "31:10", "02 Jan 24"),
            RawRow::new("Battersea Park", "31:11", "2024-01-02"),
        ];
        match normalize(&rows) {
            Err(RankingError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "2024-01-02");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_custom_default_country() {
        let options = NormalizeOptions {
            default_country: "IRL".to_string(),
            ..Default::default()
        };
        let rows = vec![RawRow::new("Phoenix Park", "15:01", "10 Feb 24")];
        let results = normalize_rows(&rows, &options).unwrap();
        assert_eq!(results[0].country, "IRL");
    }

    #[test]
    fn test_read_raw_rows_ignores_extra_columns() {
        let csv = "Rank,Perf,Name,Venue,Date\n\
                   1,27:57,A Runner,\"Parliament Hill, GB\",01 Jan 24\n\
                   2,31:10,B Runner,Battersea Park,02 Jan 24\n";
        let rows = read_raw_rows(csv.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![
                RawRow::new("Parliament Hill, GB", "27:57", "01 Jan 24"),
                RawRow::new("Battersea Park", "31:10", "02 Jan 24"),
            ]
        );
    }

    #[test]
    fn test_read_raw_rows_short_record() {
        let csv = "Perf,Venue,Date\n27:57,Battersea Park\n";
        let rows = read_raw_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].date, "");
    }

    #[test]
    fn test_read_raw_rows_missing_date_column() {
        let csv = "Perf,Venue\n27:57,Battersea Park\n";
        let err = read_raw_rows(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RankingError::MissingField("Date")));
    }
}

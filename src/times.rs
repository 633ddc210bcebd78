//! Race-time parsing and display formatting.
//!
//! Times travel through the pipeline as whole seconds. Every string shown in
//! a report, whether a `Fastest` cell or a threshold column header, is
//! produced here so the hour/minute convention is the same everywhere.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RankingError, Result};

pub const MINUTE_SECONDS: u32 = 60;
pub const HOUR_SECONDS: u32 = 3_600;

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d{2}(:\d{2})?$").expect("static time pattern"));

/// Returns true when `text` has the shape of a clock time (`M:SS` or `H:MM:SS`).
pub fn is_time(text: &str) -> bool {
    TIME_PATTERN.is_match(text)
}

/// Parses a colon-separated race time into seconds.
///
/// Groups are read right to left as seconds, minutes and hours, so `"27:57"`
/// is 1677 and `"1:02:03"` is 3723.
///
/// # Errors
///
/// Returns [`RankingError::UnparseableTime`] for any other shape, or when
/// the value does not fit in a `u32`.
pub fn parse_time(text: &str) -> Result<u32> {
    if !is_time(text) {
        return Err(RankingError::UnparseableTime(text.to_string()));
    }

    let mut total: u32 = 0;
    let mut scale: u32 = 1;
    for part in text.rsplit(':') {
        let value = part
            .parse::<u32>()
            .ok()
            .and_then(|v| v.checked_mul(scale))
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| RankingError::UnparseableTime(text.to_string()))?;
        total = value;
        scale = scale.saturating_mul(MINUTE_SECONDS);
    }

    Ok(total)
}

/// Formats seconds as `MM:SS` below one hour, `H:MM:SS` from one hour on.
pub fn format_seconds(total: u32) -> String {
    if total < HOUR_SECONDS {
        let minutes = total / MINUTE_SECONDS;
        let seconds = total % MINUTE_SECONDS;
        return format!("{minutes:02}:{seconds:02}");
    }

    let hours = total / HOUR_SECONDS;
    let minutes = (total % HOUR_SECONDS) / MINUTE_SECONDS;
    let seconds = total % MINUTE_SECONDS;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Column header for a minute threshold: `"< 30"`, or `"< 1:05"` from an hour up.
pub fn format_threshold_label(minute: u32) -> String {
    if minute >= MINUTE_SECONDS {
        let hours = minute / MINUTE_SECONDS;
        let remaining = minute % MINUTE_SECONDS;
        return format!("< {hours}:{remaining:02}");
    }
    format!("< {minute}")
}

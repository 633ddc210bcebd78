use tracing::debug;

use crate::analyzers::types::{Threshold, ThresholdSet};
use crate::times::MINUTE_SECONDS;

/// Derives the minute boundaries for a batch from its fastest and slowest times.
///
/// The first boundary is the minute after the fastest time and the last is the
/// slowest time rounded up to a whole minute, never below the first.
///
/// Returns `None` for an empty batch.
pub fn derive_thresholds(times: &[u32]) -> Option<ThresholdSet> {
    let min = *times.iter().min()?;
    let max = *times.iter().max()?;

    let start = min / MINUTE_SECONDS + 1;
    let end = max.div_ceil(MINUTE_SECONDS).max(start);

    let mut thresholds: Vec<Threshold> = (start..=end).map(Threshold).collect();
    if thresholds.is_empty() {
        thresholds.push(Threshold(min.div_ceil(MINUTE_SECONDS)));
    }

    debug!(
        min_seconds = min,
        max_seconds = max,
        start,
        end,
        count = thresholds.len(),
        "Derived thresholds"
    );

    Some(ThresholdSet { thresholds })
}

use std::collections::BTreeMap;

use crate::analyzers::types::{AggregatedRow, GroupKey, ThresholdSet};
use crate::parser::NormalizedResult;

/// Groups results by `(date, venue, country)` and counts, per group, how many
/// beat each threshold, alongside the group's fastest time.
///
/// Rows come back in key order. Results are not deduplicated.
pub fn aggregate_results(results: &[NormalizedResult], thresholds: &ThresholdSet) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<GroupKey, Vec<u32>> = BTreeMap::new();

    for result in results {
        groups
            .entry(GroupKey {
                date: result.date,
                venue: result.venue.clone(),
                country: result.country.clone(),
            })
            .or_default()
            .push(result.time_seconds);
    }

    groups
        .into_iter()
        .filter_map(|(key, times)| {
            let fastest_seconds = *times.iter().min()?;

            let bucket_counts = thresholds
                .as_slice()
                .iter()
                .map(|t| times.iter().filter(|&&s| t.admits(s)).count())
                .collect();

            Some(AggregatedRow {
                date: key.date,
                venue: key.venue,
                country: key.country,
                fastest_seconds,
                bucket_counts,
            })
        })
        .collect()
}

//! Standard competition ranking ("1224") with tie compression
//!
//! Records are ranked by `total_score` descending. Equal totals share a rank
//! and the next lower total is ranked by its 1-based position, so three
//! competitors tied for second are followed by fifth place.

use crate::error::{CircuitError, Result};
use crate::types::{RankedResult, ResultRecord};
use tracing::debug;

/// Rank one round/class pool of results.
///
/// The input is expected to hold a single `circuit_round` and `class_level`;
/// filtering is the caller's job. Input order does not need to be sorted: the
/// records are stable-sorted by total descending first, so an already sorted
/// slice keeps its order and equal totals keep their relative order.
///
/// Ties are decided on `total_score` alone. Subscores never split a tie.
///
/// # Errors
/// Returns [`CircuitError::MalformedInput`] for the first record without a
/// `total_score`. The whole batch is rejected rather than partially ranked.
pub fn compute_rankings(results: &[ResultRecord]) -> Result<Vec<RankedResult>> {
    let mut scored = Vec::with_capacity(results.len());
    for (position, record) in results.iter().enumerate() {
        let total = record
            .total_score
            .ok_or_else(|| CircuitError::MalformedInput {
                competitor_id: record.competitor_id.clone(),
                position,
                reason: "total_score is missing".to_string(),
            })?;
        scored.push((total, record));
    }

    // `sort_by` is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut current_rank: u32 = 1;
    let mut current_score: Option<u32> = None;
    let mut distinct_ranks = 0usize;

    let ranked: Vec<RankedResult> = scored
        .into_iter()
        .enumerate()
        .map(|(index, (total, record))| {
            if current_score != Some(total) {
                current_rank = (index + 1) as u32;
                current_score = Some(total);
                distinct_ranks += 1;
            }

            RankedResult {
                rank: current_rank,
                total_score: total,
                record: record.clone(),
            }
        })
        .collect();

    debug!(
        "Ranked {} results into {} distinct ranks",
        ranked.len(),
        distinct_ranks
    );

    Ok(ranked)
}

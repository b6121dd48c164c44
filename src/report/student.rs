//! A student's own result, rank and recent history

use crate::error::{CircuitError, Result};
use crate::ranking::{compute_rankings, find_rank, RankLookup};
use crate::source::ResultSource;
use crate::types::{ClassLevel, HistoryEntry, ResultRecord, RoundId, RoundSelector, Student};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Class levels in the order history is shown, highest tier first
const HISTORY_CLASS_ORDER: [ClassLevel; 3] = [ClassLevel::F2, ClassLevel::F1, ClassLevel::F0];

/// The student's result in the selected round and its place in the class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStanding {
    pub record: ResultRecord,
    pub rank: RankLookup,
}

/// History entries of one class level, newest round first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryGroup {
    pub class_level: ClassLevel,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student: Student,
    pub circuit_round: RoundId,
    pub event_date: NaiveDate,
    pub month_label: String,
    /// `None` when the student did not take part in the round
    pub current: Option<CurrentStanding>,
    pub history: Vec<HistoryGroup>,
}

impl StudentReport {
    /// Assemble the report for one student.
    ///
    /// # Errors
    /// - `RoundNotFound` when `Latest` is requested but no round exists, or
    ///   the selected round has no event
    /// - `CompetitorNotFound` for an unknown student
    /// - `NoResults` when the student has neither a result in the round nor
    ///   any history
    ///
    /// A class pool the engine rejects (a classmate without a total) leaves
    /// the rank unknown instead of failing the report.
    pub async fn build(
        source: &dyn ResultSource,
        competitor_id: &str,
        selector: RoundSelector,
        history_limit: usize,
    ) -> Result<Self> {
        let round = resolve_round(source, selector).await?;

        let student = source
            .student(competitor_id)
            .await?
            .ok_or_else(|| CircuitError::CompetitorNotFound {
                competitor_id: competitor_id.to_string(),
            })?;

        let event = source
            .event(round)
            .await?
            .ok_or_else(|| CircuitError::RoundNotFound {
                round: round.to_string(),
            })?;

        let current = match source.competitor_result(competitor_id, round).await? {
            Some(record) => {
                let pool = source.class_results(round, record.class_level).await?;
                let rank = rank_in_pool(competitor_id, &pool)?;
                debug!(
                    "{} placed {} in round {} class {}",
                    competitor_id, rank, round, record.class_level
                );
                Some(CurrentStanding { record, rank })
            }
            None => None,
        };

        let history = source
            .competitor_history(competitor_id, history_limit)
            .await?;

        if current.is_none() && history.is_empty() {
            return Err(CircuitError::NoResults {
                competitor_id: competitor_id.to_string(),
            }
            .into());
        }

        info!(
            "Built report for {} round {} ({} history entries)",
            competitor_id,
            round,
            history.len()
        );

        Ok(Self {
            student,
            circuit_round: round,
            month_label: event.month_label(),
            event_date: event.event_date,
            current,
            history: group_history(history),
        })
    }
}

fn rank_in_pool(competitor_id: &str, pool: &[ResultRecord]) -> Result<RankLookup> {
    match compute_rankings(pool) {
        Ok(ranked) => Ok(find_rank(competitor_id, &ranked)),
        Err(e)
            if matches!(
                e.downcast_ref::<CircuitError>(),
                Some(CircuitError::MalformedInput { .. })
            ) =>
        {
            warn!("Rank of {} unavailable: {}", competitor_id, e);
            Ok(RankLookup {
                rank: None,
                total_competitors: pool.len(),
            })
        }
        Err(e) => Err(e),
    }
}

async fn resolve_round(source: &dyn ResultSource, selector: RoundSelector) -> Result<RoundId> {
    match selector {
        RoundSelector::Round(round) => Ok(round),
        RoundSelector::Latest => {
            let latest = source.latest_round().await?.ok_or_else(|| {
                CircuitError::RoundNotFound {
                    round: selector.to_string(),
                }
            })?;
            debug!("Resolved latest round to {}", latest);
            Ok(latest)
        }
    }
}

/// Group history by class level (F2, F1, F0), dropping empty groups
pub fn group_history(history: Vec<HistoryEntry>) -> Vec<HistoryGroup> {
    HISTORY_CLASS_ORDER
        .iter()
        .filter_map(|&class_level| {
            let entries: Vec<HistoryEntry> = history
                .iter()
                .filter(|entry| entry.record.class_level == class_level)
                .cloned()
                .collect();

            if entries.is_empty() {
                None
            } else {
                Some(HistoryGroup {
                    class_level,
                    entries,
                })
            }
        })
        .collect()
}

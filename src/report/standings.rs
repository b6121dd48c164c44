//! Class standings for one round

use crate::error::{CircuitError, Result};
use crate::ranking::compute_rankings;
use crate::source::ResultSource;
use crate::types::{ClassLevel, CompetitorId, Medal, RoundId, Subscores};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// One line of the standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: u32,
    pub medal: Option<Medal>,
    pub competitor_id: CompetitorId,
    /// Empty when the student record is unknown
    pub name: String,
    pub subscores: Subscores,
    pub total_score: u32,
}

/// Ranked results of one class in one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStandings {
    pub circuit_round: RoundId,
    pub class_level: ClassLevel,
    pub event_date: NaiveDate,
    pub month_label: String,
    pub rows: Vec<StandingRow>,
}

impl ClassStandings {
    pub async fn build(
        source: &dyn ResultSource,
        round: RoundId,
        class_level: ClassLevel,
    ) -> Result<Self> {
        let event = source
            .event(round)
            .await?
            .ok_or_else(|| CircuitError::RoundNotFound {
                round: round.to_string(),
            })?;

        let results = source.class_results(round, class_level).await?;
        let ranked = compute_rankings(&results).inspect_err(|e| {
            warn!("Cannot rank round {} class {}: {}", round, class_level, e);
        })?;

        let ids: Vec<CompetitorId> = ranked
            .iter()
            .map(|r| r.record.competitor_id.clone())
            .collect();
        let names: HashMap<CompetitorId, String> = source
            .students(&ids)
            .await?
            .into_iter()
            .map(|s| (s.competitor_id.clone(), s.display_name()))
            .collect();

        let rows: Vec<StandingRow> = ranked
            .into_iter()
            .map(|r| StandingRow {
                rank: r.rank,
                medal: Medal::for_rank(r.rank),
                name: names.get(&r.record.competitor_id).cloned().unwrap_or_default(),
                competitor_id: r.record.competitor_id,
                subscores: r.record.subscores,
                total_score: r.total_score,
            })
            .collect();

        info!(
            "Built standings for round {} class {} ({} competitors)",
            round,
            class_level,
            rows.len()
        );

        Ok(Self {
            circuit_round: round,
            class_level,
            month_label: event.month_label(),
            event_date: event.event_date,
            rows,
        })
    }
}

//! "Rank X of N" lookup for one competitor

use crate::types::RankedResult;
use serde::{Deserialize, Serialize};

/// Where one competitor placed within a ranked pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankLookup {
    /// Competitive rank, `None` when the competitor is not in the pool
    pub rank: Option<u32>,
    /// Size of the pool, whether or not the competitor was found
    pub total_competitors: usize,
}

impl RankLookup {
    pub fn is_found(&self) -> bool {
        self.rank.is_some()
    }
}

impl std::fmt::Display for RankLookup {
    /// Renders "2 / 15", with "-" standing in for a missing rank or empty pool
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "{}", rank)?,
            None => write!(f, "-")?,
        }
        if self.total_competitors == 0 {
            write!(f, " / -")
        } else {
            write!(f, " / {}", self.total_competitors)
        }
    }
}

/// Find a competitor's rank among already ranked results.
///
/// Absence is a routine outcome (the student skipped the round) and is
/// reported through `rank: None` rather than an error.
pub fn find_rank(competitor_id: &str, ranked: &[RankedResult]) -> RankLookup {
    let rank = ranked
        .iter()
        .find(|result| result.competitor_id() == competitor_id)
        .map(|result| result.rank);

    RankLookup {
        rank,
        total_competitors: ranked.len(),
    }
}

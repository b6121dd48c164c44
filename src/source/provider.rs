//! Result source trait
//!
//! Mirrors the queries the hosted backend answers: everything is filtered and
//! ordered by the source, and ranking happens afterwards in `crate::ranking`.

use crate::error::Result;
use crate::types::{
    CircuitEvent, ClassLevel, CompetitorId, HistoryEntry, ResultRecord, RoundId, Student,
};
use async_trait::async_trait;

/// Trait for reading circuit data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Get the event for a round
    async fn event(&self, round: RoundId) -> Result<Option<CircuitEvent>>;

    /// Most recent events, newest round first
    async fn recent_events(&self, limit: usize) -> Result<Vec<CircuitEvent>>;

    /// Highest round number with an event, if any
    async fn latest_round(&self) -> Result<Option<RoundId>>;

    /// All results of one round and class, total score descending
    ///
    /// Records without a total come last; the ranking engine rejects them.
    async fn class_results(
        &self,
        round: RoundId,
        class_level: ClassLevel,
    ) -> Result<Vec<ResultRecord>>;

    /// One competitor's result for a round
    async fn competitor_result(
        &self,
        competitor_id: &str,
        round: RoundId,
    ) -> Result<Option<ResultRecord>>;

    /// A competitor's most recent results, newest round first
    async fn competitor_history(
        &self,
        competitor_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>>;

    /// Look up one student
    async fn student(&self, competitor_id: &str) -> Result<Option<Student>>;

    /// Look up several students; unknown ids are skipped
    async fn students(&self, competitor_ids: &[CompetitorId]) -> Result<Vec<Student>>;

    /// Students linked to a parent account, in link order
    ///
    /// An unknown parent has no children. Links to unknown students are skipped.
    async fn children(&self, parent_id: &str) -> Result<Vec<Student>>;
}

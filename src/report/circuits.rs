//! List of recent circuit rounds

use crate::error::Result;
use crate::source::ResultSource;
use crate::types::{CircuitEvent, RoundId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One round in the circuit list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSummary {
    pub circuit_round: RoundId,
    pub event_date: NaiveDate,
    pub month_label: String,
}

impl From<CircuitEvent> for CircuitSummary {
    fn from(event: CircuitEvent) -> Self {
        Self {
            month_label: event.month_label(),
            circuit_round: event.circuit_round,
            event_date: event.event_date,
        }
    }
}

/// Most recent rounds, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitList {
    pub circuits: Vec<CircuitSummary>,
}

impl CircuitList {
    pub async fn build(source: &dyn ResultSource, limit: usize) -> Result<Self> {
        let circuits: Vec<CircuitSummary> = source
            .recent_events(limit)
            .await?
            .into_iter()
            .map(CircuitSummary::from)
            .collect();

        debug!("Listing {} circuit rounds", circuits.len());
        Ok(Self { circuits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryResultSource;

    #[tokio::test]
    async fn test_circuit_list_is_limited_and_newest_first() {
        let source = InMemoryResultSource::new();
        for round in 1..=5u32 {
            source
                .insert_event(CircuitEvent {
                    circuit_round: round,
                    event_date: NaiveDate::from_ymd_opt(2024, round, 1).unwrap(),
                })
                .unwrap();
        }

        let list = CircuitList::build(&source, 3).await.unwrap();
        let rounds: Vec<RoundId> = list.circuits.iter().map(|c| c.circuit_round).collect();
        assert_eq!(rounds, vec![5, 4, 3]);
        assert_eq!(list.circuits[0].month_label, "May 2024");
    }

    #[tokio::test]
    async fn test_empty_circuit_list() {
        let source = InMemoryResultSource::new();
        let list = CircuitList::build(&source, 24).await.unwrap();
        assert!(list.circuits.is_empty());
    }
}

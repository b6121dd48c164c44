//! In-memory result source
//!
//! Holds events, students and results behind `RwLock`s. Locks are never held
//! across an await point.

use crate::error::{CircuitError, Result};
use crate::source::provider::ResultSource;
use crate::types::{
    CircuitEvent, ClassLevel, CompetitorId, HistoryEntry, ParentId, Relationship, ResultRecord,
    RoundId, Student,
};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Serialized form of a full data set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<CircuitEvent>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }
}

/// In-memory result source implementation
#[derive(Debug, Default)]
pub struct InMemoryResultSource {
    events: RwLock<BTreeMap<RoundId, CircuitEvent>>,
    students: RwLock<HashMap<CompetitorId, Student>>,
    results: RwLock<Vec<ResultRecord>>,
    relationships: RwLock<HashMap<ParentId, Vec<CompetitorId>>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| {
        CircuitError::DataSourceError {
            message: "Failed to acquire read lock".to_string(),
        }
        .into()
    })
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| {
        CircuitError::DataSourceError {
            message: "Failed to acquire write lock".to_string(),
        }
        .into()
    })
}

impl InMemoryResultSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source holding everything in a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let source = Self::new();

        for event in snapshot.events {
            source.insert_event(event)?;
        }
        for student in snapshot.students {
            source.insert_student(student)?;
        }
        for record in snapshot.results {
            source.insert_result(record)?;
        }
        for relationship in snapshot.relationships {
            source.insert_relationship(relationship)?;
        }

        info!(
            "Loaded snapshot: {} events, {} students, {} results, {} parents",
            read(&source.events)?.len(),
            read(&source.students)?.len(),
            read(&source.results)?.len(),
            read(&source.relationships)?.len()
        );

        Ok(source)
    }

    /// Load a snapshot file into a new source
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading snapshot from: {}", path.display());
        Self::from_snapshot(Snapshot::from_path(path)?)
    }

    /// Store or replace the event of a round
    pub fn insert_event(&self, event: CircuitEvent) -> Result<()> {
        write(&self.events)?.insert(event.circuit_round, event);
        Ok(())
    }

    /// Store or replace a student
    pub fn insert_student(&self, student: Student) -> Result<()> {
        write(&self.students)?.insert(student.competitor_id.clone(), student);
        Ok(())
    }

    /// Store a result, replacing any earlier one for the same competitor and round
    pub fn insert_result(&self, record: ResultRecord) -> Result<()> {
        let mut results = write(&self.results)?;
        match results.iter_mut().find(|existing| {
            existing.competitor_id == record.competitor_id
                && existing.circuit_round == record.circuit_round
        }) {
            Some(existing) => {
                debug!(
                    "Replacing result for {} in round {}",
                    record.competitor_id, record.circuit_round
                );
                *existing = record;
            }
            None => results.push(record),
        }
        Ok(())
    }

    /// Link a child to a parent; linking the same pair twice is a no-op
    pub fn insert_relationship(&self, relationship: Relationship) -> Result<()> {
        let mut relationships = write(&self.relationships)?;
        let children = relationships.entry(relationship.parent_id).or_default();
        if !children.contains(&relationship.competitor_id) {
            children.push(relationship.competitor_id);
        }
        Ok(())
    }

    /// Total number of stored results
    pub fn result_count(&self) -> Result<usize> {
        Ok(read(&self.results)?.len())
    }
}

#[async_trait]
impl ResultSource for InMemoryResultSource {
    async fn event(&self, round: RoundId) -> Result<Option<CircuitEvent>> {
        Ok(read(&self.events)?.get(&round).cloned())
    }

    async fn recent_events(&self, limit: usize) -> Result<Vec<CircuitEvent>> {
        Ok(read(&self.events)?
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn latest_round(&self) -> Result<Option<RoundId>> {
        Ok(read(&self.events)?.keys().next_back().copied())
    }

    async fn class_results(
        &self,
        round: RoundId,
        class_level: ClassLevel,
    ) -> Result<Vec<ResultRecord>> {
        let mut matching: Vec<ResultRecord> = read(&self.results)?
            .iter()
            .filter(|r| r.circuit_round == round && r.class_level == class_level)
            .cloned()
            .collect();

        // None sorts below Some, so missing totals land at the end
        matching.sort_by(|a, b| b.total_score.cmp(&a.total_score));

        debug!(
            "Round {} class {}: {} results",
            round,
            class_level,
            matching.len()
        );
        Ok(matching)
    }

    async fn competitor_result(
        &self,
        competitor_id: &str,
        round: RoundId,
    ) -> Result<Option<ResultRecord>> {
        Ok(read(&self.results)?
            .iter()
            .find(|r| r.competitor_id == competitor_id && r.circuit_round == round)
            .cloned())
    }

    async fn competitor_history(
        &self,
        competitor_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>> {
        let mut records: Vec<ResultRecord> = read(&self.results)?
            .iter()
            .filter(|r| r.competitor_id == competitor_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.circuit_round.cmp(&a.circuit_round));
        records.truncate(limit);

        let events = read(&self.events)?;
        Ok(records
            .into_iter()
            .map(|record| HistoryEntry {
                event_date: events.get(&record.circuit_round).map(|e| e.event_date),
                record,
            })
            .collect())
    }

    async fn student(&self, competitor_id: &str) -> Result<Option<Student>> {
        Ok(read(&self.students)?.get(competitor_id).cloned())
    }

    async fn students(&self, competitor_ids: &[CompetitorId]) -> Result<Vec<Student>> {
        let students = read(&self.students)?;
        Ok(competitor_ids
            .iter()
            .filter_map(|id| students.get(id).cloned())
            .collect())
    }

    async fn children(&self, parent_id: &str) -> Result<Vec<Student>> {
        let child_ids = read(&self.relationships)?
            .get(parent_id)
            .cloned()
            .unwrap_or_default();

        let children = self.students(&child_ids).await?;
        debug!("Parent {}: {} children", parent_id, children.len());
        Ok(children)
    }
}

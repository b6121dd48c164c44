//! Test fixtures for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use circuit_standings::error::Result;
use circuit_standings::source::{InMemoryResultSource, ResultSource, Snapshot};
use circuit_standings::types::{
    CircuitEvent, ClassLevel, CompetitorId, HistoryEntry, Relationship, ResultRecord, RoundId,
    Student, Subscores,
};
use std::sync::Mutex;

/// Build a result whose total equals its subscore sum
pub fn result(
    id: &str,
    round: RoundId,
    class_level: ClassLevel,
    scores: (u32, u32, u32),
) -> ResultRecord {
    ResultRecord::new(
        id,
        round,
        class_level,
        Subscores {
            multiplication: scores.0,
            division: scores.1,
            mental_calculation: scores.2,
        },
    )
}

pub fn student(id: &str, family: &str, given: &str) -> Student {
    Student {
        competitor_id: id.to_string(),
        family_name: family.to_string(),
        given_name: given.to_string(),
        school_name: Some("Central Abacus School".to_string()),
    }
}

/// Three monthly rounds with results across all class levels
///
/// Round 14, F1 totals: hana 95, ken 88, yuki 88, riku 80, mei 72.
/// Yuki moved from F0 to F1 at round 13.
/// Parent "suzuki" has ken and mei; parent "ito" has only sora.
pub fn circuit_snapshot() -> Snapshot {
    let events = (12..=14)
        .map(|round| CircuitEvent {
            circuit_round: round,
            event_date: NaiveDate::from_ymd_opt(2024, round - 8, 12).unwrap(),
        })
        .collect();

    let students = vec![
        student("hana", "Sato", "Hana"),
        student("ken", "Suzuki", "Ken"),
        student("yuki", "Takahashi", "Yuki"),
        student("riku", "Tanaka", "Riku"),
        student("mei", "Watanabe", "Mei"),
        student("sora", "Ito", "Sora"),
        student("newcomer", "Yamamoto", "Aoi"),
    ];

    let results = vec![
        // Round 12
        result("hana", 12, ClassLevel::F1, (30, 30, 30)),
        result("ken", 12, ClassLevel::F1, (28, 30, 25)),
        result("riku", 12, ClassLevel::F1, (25, 25, 25)),
        result("yuki", 12, ClassLevel::F0, (30, 20, 20)),
        result("sora", 12, ClassLevel::F2, (35, 35, 28)),
        // Round 13
        result("hana", 13, ClassLevel::F1, (32, 30, 30)),
        result("ken", 13, ClassLevel::F1, (30, 30, 30)),
        result("yuki", 13, ClassLevel::F1, (30, 30, 30)),
        result("riku", 13, ClassLevel::F1, (26, 26, 26)),
        result("sora", 13, ClassLevel::F2, (34, 34, 30)),
        // Round 14
        result("hana", 14, ClassLevel::F1, (35, 30, 30)),
        result("ken", 14, ClassLevel::F1, (30, 28, 30)),
        result("yuki", 14, ClassLevel::F1, (28, 30, 30)),
        result("riku", 14, ClassLevel::F1, (30, 25, 25)),
        result("mei", 14, ClassLevel::F1, (24, 24, 24)),
        result("sora", 14, ClassLevel::F2, (33, 33, 33)),
    ];

    let relationships = [("suzuki", "ken"), ("suzuki", "mei"), ("ito", "sora")]
        .iter()
        .map(|(parent, child)| Relationship {
            parent_id: parent.to_string(),
            competitor_id: child.to_string(),
        })
        .collect();

    Snapshot {
        events,
        students,
        results,
        relationships,
    }
}

pub fn circuit_source() -> InMemoryResultSource {
    InMemoryResultSource::from_snapshot(circuit_snapshot()).unwrap()
}

/// Result source wrapper that records which queries were made
pub struct RecordingSource {
    inner: InMemoryResultSource,
    calls: Mutex<Vec<String>>,
}

impl RecordingSource {
    pub fn new(inner: InMemoryResultSource) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    /// Get all recorded calls (for testing)
    pub fn get_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Count calls whose name starts with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl ResultSource for RecordingSource {
    async fn event(&self, round: RoundId) -> Result<Option<CircuitEvent>> {
        self.record(format!("event({})", round));
        self.inner.event(round).await
    }

    async fn recent_events(&self, limit: usize) -> Result<Vec<CircuitEvent>> {
        self.record(format!("recent_events({})", limit));
        self.inner.recent_events(limit).await
    }

    async fn latest_round(&self) -> Result<Option<RoundId>> {
        self.record("latest_round".to_string());
        self.inner.latest_round().await
    }

    async fn class_results(
        &self,
        round: RoundId,
        class_level: ClassLevel,
    ) -> Result<Vec<ResultRecord>> {
        self.record(format!("class_results({}, {})", round, class_level));
        self.inner.class_results(round, class_level).await
    }

    async fn competitor_result(
        &self,
        competitor_id: &str,
        round: RoundId,
    ) -> Result<Option<ResultRecord>> {
        self.record(format!("competitor_result({}, {})", competitor_id, round));
        self.inner.competitor_result(competitor_id, round).await
    }

    async fn competitor_history(
        &self,
        competitor_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>> {
        self.record(format!("competitor_history({}, {})", competitor_id, limit));
        self.inner.competitor_history(competitor_id, limit).await
    }

    async fn student(&self, competitor_id: &str) -> Result<Option<Student>> {
        self.record(format!("student({})", competitor_id));
        self.inner.student(competitor_id).await
    }

    async fn students(&self, competitor_ids: &[CompetitorId]) -> Result<Vec<Student>> {
        self.record(format!("students({})", competitor_ids.len()));
        self.inner.students(competitor_ids).await
    }

    async fn children(&self, parent_id: &str) -> Result<Vec<Student>> {
        self.record(format!("children({})", parent_id));
        self.inner.children(parent_id).await
    }
}

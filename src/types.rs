//! Common types used throughout the circuit standings crate

use crate::error::CircuitError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for competitors (students)
pub type CompetitorId = String;

/// Circuit round number, increasing over time
pub type RoundId = u32;

/// Identifier of a parent account
pub type ParentId = String;

/// Skill tier partitioning competitors into separate ranking pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClassLevel {
    F0,
    F1,
    F2,
}

impl ClassLevel {
    /// All class levels, lowest tier first
    pub const ALL: [ClassLevel; 3] = [ClassLevel::F0, ClassLevel::F1, ClassLevel::F2];

    /// Numeric tier as stored by the backend
    pub fn tier(self) -> u8 {
        match self {
            ClassLevel::F0 => 0,
            ClassLevel::F1 => 1,
            ClassLevel::F2 => 2,
        }
    }
}

impl std::fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLevel::F0 => write!(f, "F0"),
            ClassLevel::F1 => write!(f, "F1"),
            ClassLevel::F2 => write!(f, "F2"),
        }
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = CircuitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ClassLevel::F0),
            1 => Ok(ClassLevel::F1),
            2 => Ok(ClassLevel::F2),
            other => Err(CircuitError::InvalidClassLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> Self {
        level.tier()
    }
}

impl FromStr for ClassLevel {
    type Err = CircuitError;

    /// Accepts either the tier number (`"1"`) or the label (`"F1"`, any case)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('F')
            .or_else(|| trimmed.strip_prefix('f'))
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .map_err(|_| CircuitError::InvalidClassLevel {
                value: s.to_string(),
            })
            .and_then(|tier| {
                ClassLevel::try_from(tier).map_err(|_| CircuitError::InvalidClassLevel {
                    value: s.to_string(),
                })
            })
    }
}

/// Per-category scores of one circuit result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscores {
    #[serde(rename = "multiplication_score", default)]
    pub multiplication: u32,
    #[serde(rename = "division_score", default)]
    pub division: u32,
    #[serde(rename = "mental_calculation_score", default)]
    pub mental_calculation: u32,
}

impl Subscores {
    /// Sum of the three categories, saturating at `u32::MAX`
    pub fn sum(&self) -> u32 {
        self.multiplication
            .saturating_add(self.division)
            .saturating_add(self.mental_calculation)
    }
}

/// One competitor's outcome in one circuit round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub competitor_id: CompetitorId,
    pub circuit_round: RoundId,
    pub class_level: ClassLevel,
    #[serde(flatten)]
    pub subscores: Subscores,
    /// Ranking key. Nullable upstream; the ranking engine rejects `None`.
    pub total_score: Option<u32>,
}

impl ResultRecord {
    /// Build a record whose total is the sum of its subscores
    pub fn new(
        competitor_id: impl Into<CompetitorId>,
        circuit_round: RoundId,
        class_level: ClassLevel,
        subscores: Subscores,
    ) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            circuit_round,
            class_level,
            total_score: Some(subscores.sum()),
            subscores,
        }
    }
}

/// A result annotated with its competitive rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: u32,
    pub total_score: u32,
    pub record: ResultRecord,
}

impl RankedResult {
    pub fn competitor_id(&self) -> &str {
        &self.record.competitor_id
    }
}

/// One circuit round as scheduled by the organisers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitEvent {
    pub circuit_round: RoundId,
    pub event_date: NaiveDate,
}

impl CircuitEvent {
    /// Month the round was held in, e.g. "April 2024"
    pub fn month_label(&self) -> String {
        crate::utils::month_label(self.event_date)
    }
}

/// Competitor identity as shown next to results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub competitor_id: CompetitorId,
    pub family_name: String,
    pub given_name: String,
    #[serde(default)]
    pub school_name: Option<String>,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.family_name, self.given_name)
    }
}

/// Link between a parent account and one of their children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub parent_id: ParentId,
    pub competitor_id: CompetitorId,
}

/// A past result joined with the date of its round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record: ResultRecord,
    pub event_date: Option<NaiveDate>,
}

/// Which round a report should describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundSelector {
    Latest,
    Round(RoundId),
}

impl std::fmt::Display for RoundSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundSelector::Latest => write!(f, "latest"),
            RoundSelector::Round(round) => write!(f, "{}", round),
        }
    }
}

impl FromStr for RoundSelector {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(RoundSelector::Latest);
        }

        trimmed
            .parse::<RoundId>()
            .map(RoundSelector::Round)
            .map_err(|_| CircuitError::InvalidRoundSelector {
                value: s.to_string(),
            })
    }
}

/// Podium position for the top three ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a competitive rank; tied competitors share it
    pub fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

impl std::fmt::Display for Medal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Medal::Gold => write!(f, "🥇"),
            Medal::Silver => write!(f, "🥈"),
            Medal::Bronze => write!(f, "🥉"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_level_parsing() {
        assert_eq!("0".parse::<ClassLevel>().unwrap(), ClassLevel::F0);
        assert_eq!("F1".parse::<ClassLevel>().unwrap(), ClassLevel::F1);
        assert_eq!("f2".parse::<ClassLevel>().unwrap(), ClassLevel::F2);

        let err = "3".parse::<ClassLevel>().unwrap_err();
        assert_eq!(
            err,
            CircuitError::InvalidClassLevel {
                value: "3".to_string()
            }
        );
        assert!("F".parse::<ClassLevel>().is_err());
        assert!("advanced".parse::<ClassLevel>().is_err());
    }

    #[test]
    fn test_class_level_serde_uses_tier_number() {
        assert_eq!(serde_json::to_string(&ClassLevel::F2).unwrap(), "2");
        let level: ClassLevel = serde_json::from_str("1").unwrap();
        assert_eq!(level, ClassLevel::F1);
        assert!(serde_json::from_str::<ClassLevel>("7").is_err());
    }

    #[test]
    fn test_result_record_wire_format() {
        let json = r#"{
            "competitor_id": "s1",
            "circuit_round": 12,
            "class_level": 0,
            "multiplication_score": 40,
            "division_score": 30,
            "mental_calculation_score": 20,
            "total_score": 90
        }"#;

        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.class_level, ClassLevel::F0);
        assert_eq!(record.subscores.sum(), 90);
        assert_eq!(record.total_score, Some(90));

        let missing_total = r#"{
            "competitor_id": "s2",
            "circuit_round": 12,
            "class_level": 0,
            "total_score": null
        }"#;
        let record: ResultRecord = serde_json::from_str(missing_total).unwrap();
        assert_eq!(record.total_score, None);
        assert_eq!(record.subscores, Subscores::default());
    }

    #[test]
    fn test_subscore_sum_saturates() {
        let subscores = Subscores {
            multiplication: u32::MAX,
            division: 1,
            mental_calculation: 5,
        };
        assert_eq!(subscores.sum(), u32::MAX);

        let record = ResultRecord::new("s1", 1, ClassLevel::F0, subscores);
        assert_eq!(record.total_score, Some(u32::MAX));
    }

    #[test]
    fn test_round_selector_parsing() {
        assert_eq!(
            "latest".parse::<RoundSelector>().unwrap(),
            RoundSelector::Latest
        );
        assert_eq!(
            "LATEST".parse::<RoundSelector>().unwrap(),
            RoundSelector::Latest
        );
        assert_eq!(
            "42".parse::<RoundSelector>().unwrap(),
            RoundSelector::Round(42)
        );
        assert!("-1".parse::<RoundSelector>().is_err());
        assert!("next".parse::<RoundSelector>().is_err());
    }

    #[test]
    fn test_medal_for_rank() {
        assert_eq!(Medal::for_rank(1), Some(Medal::Gold));
        assert_eq!(Medal::for_rank(2), Some(Medal::Silver));
        assert_eq!(Medal::for_rank(3), Some(Medal::Bronze));
        assert_eq!(Medal::for_rank(4), None);
        assert_eq!(Medal::for_rank(0), None);
    }

    #[test]
    fn test_student_display_name() {
        let student = Student {
            competitor_id: "s1".to_string(),
            family_name: "Sato".to_string(),
            given_name: "Yui".to_string(),
            school_name: None,
        };
        assert_eq!(student.display_name(), "Sato Yui");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use super::grade::SafetyScore;

/// Stable identifier assigned to a facility by the regulator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl FacilityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A licensed facility as recorded by the facility source. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    /// Raw city string; casing and spacing vary between sources.
    #[serde(default)]
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_beds: Option<u32>,
}

/// Presentation tone shared by narrative summaries and letter grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
}

impl Tone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSummary {
    pub bullets: Vec<String>,
    pub tone: Tone,
}

/// Precomputed intelligence for one facility. Always complete once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntelligenceRecord {
    pub safety_score: SafetyScore,
    pub violation_count: u32,
    pub summary: NarrativeSummary,
    /// Copy of the facility's city from the intelligence source, used as a fallback.
    pub city: String,
}

/// Regional reference averages for a city, used for comparative display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub avg_violations: f64,
    pub facility_count: u32,
}

/// A facility joined with its intelligence record. Only built when both exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhancedFacility {
    #[serde(flatten)]
    pub facility: Facility,
    pub intelligence: IntelligenceRecord,
}

impl EnhancedFacility {
    pub fn new(facility: Facility, intelligence: IntelligenceRecord) -> Self {
        Self {
            facility,
            intelligence,
        }
    }

    pub fn id(&self) -> &FacilityId {
        &self.facility.id
    }

    pub fn name(&self) -> &str {
        &self.facility.name
    }

    pub fn safety_score(&self) -> SafetyScore {
        self.intelligence.safety_score
    }

    pub fn violation_count(&self) -> u32 {
        self.intelligence.violation_count
    }
}

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use super::city::slugify;
use super::domain::{Benchmark, FacilityId, IntelligenceRecord, NarrativeSummary};
use super::grade::SafetyScore;
use super::load::DataLoadError;

/// Read access to precomputed facility intelligence and city benchmarks.
pub trait IntelligenceLookup: Send + Sync {
    fn facility(&self, id: &FacilityId) -> Option<IntelligenceRecord>;
    /// Benchmarks are matched on the city's slug, so any casing works.
    fn benchmark(&self, city: &str) -> Option<Benchmark>;
}

/// Immutable in-memory snapshot, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct IntelligenceStore {
    facilities: HashMap<FacilityId, IntelligenceRecord>,
    benchmarks: HashMap<String, Benchmark>,
}

impl IntelligenceStore {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;
        let mut store = Self::default();

        for (id, record) in raw.facilities {
            match record.into_record() {
                Some(record) => {
                    store.facilities.insert(FacilityId(id), record);
                }
                None => warn!(facility_id = %id, "dropping incomplete intelligence record"),
            }
        }

        for (city, benchmark) in raw.benchmarks {
            store.benchmarks.insert(slugify(&city), benchmark);
        }

        Ok(store)
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (FacilityId, IntelligenceRecord)>,
    {
        Self {
            facilities: records.into_iter().collect(),
            benchmarks: HashMap::new(),
        }
    }

    pub fn with_benchmark(mut self, city: &str, benchmark: Benchmark) -> Self {
        self.benchmarks.insert(slugify(city), benchmark);
        self
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    pub fn benchmark_count(&self) -> usize {
        self.benchmarks.len()
    }
}

impl IntelligenceLookup for IntelligenceStore {
    fn facility(&self, id: &FacilityId) -> Option<IntelligenceRecord> {
        self.facilities.get(id).cloned()
    }

    fn benchmark(&self, city: &str) -> Option<Benchmark> {
        self.benchmarks.get(&slugify(city)).copied()
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    facilities: HashMap<String, RawRecord>,
    #[serde(default)]
    benchmarks: HashMap<String, Benchmark>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    safety_score: Option<i64>,
    #[serde(default)]
    violation_count: Option<u32>,
    #[serde(default)]
    summary: Option<NarrativeSummary>,
    #[serde(default)]
    city: Option<String>,
}

impl RawRecord {
    fn into_record(self) -> Option<IntelligenceRecord> {
        let raw_score = self.safety_score?;
        let violation_count = self.violation_count?;
        let summary = self.summary?;
        let safety_score = SafetyScore::new(raw_score).unwrap_or_else(|err| {
            warn!(%err, "clamping intelligence safety score");
            SafetyScore::saturating(raw_score)
        });

        Some(IntelligenceRecord {
            safety_score,
            violation_count,
            summary,
            city: self.city.unwrap_or_default(),
        })
    }
}

use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::directory::domain::{
    EnhancedFacility, Facility, FacilityId, IntelligenceRecord, NarrativeSummary, Tone,
};
use crate::directory::grade::SafetyScore;
use crate::directory::intelligence::IntelligenceStore;
use crate::directory::repository::{CsvFacilityRepository, FacilityRepository, RepositoryError};
use crate::directory::service::DirectoryService;

pub(super) fn facility(id: &str, name: &str, city: &str) -> Facility {
    Facility {
        id: FacilityId::new(id),
        name: name.to_string(),
        city: city.to_string(),
        state: "TX".to_string(),
        total_beds: Some(100),
    }
}

pub(super) fn intelligence(score: i64, violations: u32) -> IntelligenceRecord {
    let tone = if score >= 80 {
        Tone::Positive
    } else if score >= 60 {
        Tone::Neutral
    } else {
        Tone::Warning
    };
    IntelligenceRecord {
        safety_score: SafetyScore::new(score).expect("valid score"),
        violation_count: violations,
        summary: NarrativeSummary {
            bullets: vec![format!("{violations} citations in the last three years")],
            tone,
        },
        city: String::new(),
    }
}

pub(super) fn store(entries: &[(&str, i64, u32)]) -> IntelligenceStore {
    IntelligenceStore::from_records(
        entries
            .iter()
            .map(|(id, score, violations)| (FacilityId::new(*id), intelligence(*score, *violations))),
    )
}

pub(super) fn enhanced(id: &str, score: i64) -> EnhancedFacility {
    EnhancedFacility::new(
        facility(id, &format!("Facility {id}"), "Austin"),
        intelligence(score, 0),
    )
}

pub(super) fn enhanced_scores(scores: &[i64]) -> Vec<EnhancedFacility> {
    scores
        .iter()
        .enumerate()
        .map(|(index, score)| enhanced(&format!("f{index:02}"), *score))
        .collect()
}

pub(super) fn ids(facilities: &[EnhancedFacility]) -> Vec<&str> {
    facilities.iter().map(|facility| facility.id().as_str()).collect()
}

pub(super) fn scores(facilities: &[EnhancedFacility]) -> Vec<u8> {
    facilities
        .iter()
        .map(|facility| facility.safety_score().value())
        .collect()
}

/// Houston (2), Dallas (3), San Antonio (6 across spellings), one facility
/// without intelligence and one out-of-state facility.
pub(super) fn sample_facilities() -> Vec<Facility> {
    let mut out_of_state = facility("375001", "Red River Care", "Tulsa");
    out_of_state.state = "OK".to_string();

    vec![
        facility("a", "Oak Manor", "houston"),
        facility("b", "Pine Villa", "Houston "),
        facility("d1", "Dallas One", "DALLAS"),
        facility("d2", "Dallas Two", "dallas"),
        facility("d3", "Dallas Three", "Dallas"),
        facility("s1", "Alamo Heights", "SAN ANTONIO"),
        facility("s2", "Mission Oaks", "san antonio"),
        facility("s3", "River Walk Care", "San  Antonio"),
        facility("s4", "Stone Oak", "San Antonio"),
        facility("s5", "Brooks City", "SAN antonio"),
        facility("s6", "Southside Rehab", "san antonio "),
        facility("x1", "Unscored House", "Austin"),
        out_of_state,
    ]
}

pub(super) fn sample_store() -> IntelligenceStore {
    store(&[
        ("a", 95, 1),
        ("b", 40, 18),
        ("d1", 90, 2),
        ("d2", 80, 4),
        ("d3", 70, 6),
        ("s1", 88, 3),
        ("s2", 45, 14),
        ("s3", 72, 6),
        ("s4", 91, 1),
        ("s5", 63, 9),
        ("s6", 30, 21),
        ("375001", 85, 2),
    ])
}

pub(super) type SampleService = DirectoryService<CsvFacilityRepository, IntelligenceStore>;

pub(super) fn build_service() -> SampleService {
    DirectoryService::new(
        Arc::new(CsvFacilityRepository::new(sample_facilities(), "TX")),
        Arc::new(sample_store()),
    )
}

pub(super) struct UnavailableRepository;

impl FacilityRepository for UnavailableRepository {
    fn active_facilities(&self) -> Result<Vec<Facility>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &FacilityId) -> Result<Option<Facility>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn search(&self, _needle: &str, _limit: usize) -> Result<Vec<Facility>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

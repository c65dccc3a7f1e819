//! Facility directory: city normalization, intelligence joins, per-city
//! aggregation, ranking panels and score grading.

pub mod city;
pub mod domain;
pub mod grade;
pub mod hubs;
pub mod insights;
pub mod intelligence;
mod load;
pub mod ranking;
pub mod repository;
pub(crate) mod rounding;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use city::{slugify, title_case, CityResolution, UNKNOWN_CITY};
pub use domain::{
    Benchmark, EnhancedFacility, Facility, FacilityId, IntelligenceRecord, NarrativeSummary, Tone,
};
pub use grade::{
    compact_grade, grade_legend, grade_of, CompactGrade, GradeAssessment, GradeBand, SafetyGrade,
    SafetyScore, ScoreOutOfRange,
};
pub use hubs::{build_city_hubs, CityHubs, CityLookup, CityStats, CitySummary};
pub use insights::{CityIndex, CityOutlook, RegionalContext, StatewideOverview};
pub use intelligence::{IntelligenceLookup, IntelligenceStore};
pub use load::DataLoadError;
pub use ranking::{partition, RankingLayout, RankingPanels};
pub use repository::{CsvFacilityRepository, FacilityRepository, RepositoryError};
pub use router::directory_router;
pub use service::{
    CityResolutionOutcome, CityView, DirectoryOverview, DirectoryService, DirectoryServiceError,
    FacilityProfile,
};

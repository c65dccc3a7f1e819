use serde::Serialize;
use std::sync::Arc;

use super::city::CityResolution;
use super::domain::{Benchmark, Facility, FacilityId, IntelligenceRecord};
use super::grade::{compact_grade, grade_of, CompactGrade, GradeAssessment};
use super::hubs::{build_city_hubs, CityHubs, CityLookup, CityStats};
use super::insights::{CityIndex, CityOutlook, RegionalContext, StatewideOverview};
use super::intelligence::IntelligenceLookup;
use super::ranking::{partition, RankingLayout};
use super::repository::{FacilityRepository, RepositoryError};

/// Queries shorter than this return no results.
pub const MIN_SEARCH_CHARS: usize = 2;
pub const MAX_SEARCH_RESULTS: usize = 8;

/// Service composing the facility repository and the intelligence snapshot.
pub struct DirectoryService<F, L> {
    repository: Arc<F>,
    intelligence: Arc<L>,
}

impl<F, L> DirectoryService<F, L>
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    pub fn new(repository: Arc<F>, intelligence: Arc<L>) -> Self {
        Self {
            repository,
            intelligence,
        }
    }

    /// Rebuild every city hub from the current repository snapshot.
    pub fn city_hubs(&self) -> Result<CityHubs, DirectoryServiceError> {
        let facilities = self.repository.active_facilities()?;
        Ok(build_city_hubs(&facilities, self.intelligence.as_ref()))
    }

    /// Resolve a city segment, reporting non-canonical spellings as redirects.
    pub fn city(&self, segment: &str) -> Result<CityResolutionOutcome, DirectoryServiceError> {
        let hubs = self.city_hubs()?;
        match hubs.lookup(segment) {
            CityLookup::Canonical(stats) => Ok(CityResolutionOutcome::Found(Box::new(
                self.city_view(stats.clone()),
            ))),
            CityLookup::Redirect { slug } => Ok(CityResolutionOutcome::Redirect {
                slug: slug.to_string(),
            }),
            CityLookup::NotFound => Err(DirectoryServiceError::CityNotFound(segment.to_string())),
        }
    }

    fn city_view(&self, stats: CityStats) -> CityView {
        let rankings = partition(&stats.facilities);
        let outlook = CityOutlook::for_score(stats.avg_safety_score);
        let benchmark = self.intelligence.benchmark(&stats.name);
        CityView {
            outlook,
            outlook_headline: outlook.headline(),
            benchmark,
            rankings,
            stats,
        }
    }

    pub fn overview(&self) -> Result<DirectoryOverview, DirectoryServiceError> {
        let hubs = self.city_hubs()?;
        Ok(DirectoryOverview {
            statewide: StatewideOverview::from_hubs(&hubs),
            index: CityIndex::from_hubs(&hubs),
        })
    }

    /// Detail view for one facility. Facilities without intelligence carry no score.
    pub fn facility_profile(
        &self,
        id: &FacilityId,
    ) -> Result<FacilityProfile, DirectoryServiceError> {
        let facility = self
            .repository
            .fetch(id)?
            .ok_or_else(|| DirectoryServiceError::FacilityNotFound(id.clone()))?;
        let intelligence = self.intelligence.facility(id);
        let intelligence_city = intelligence
            .as_ref()
            .map(|record| record.city.as_str())
            .unwrap_or_default();
        let city = CityResolution::resolve(&facility.city, intelligence_city).display_name();
        let benchmark = self.intelligence.benchmark(&city);

        let assessment = intelligence
            .as_ref()
            .map(|record| grade_of(record.safety_score));
        let badge = intelligence
            .as_ref()
            .map(|record| compact_grade(record.safety_score));
        let regional_context = intelligence
            .as_ref()
            .map(|record| RegionalContext::compare(record.violation_count, benchmark.as_ref()));

        Ok(FacilityProfile {
            facility,
            city,
            intelligence,
            assessment,
            badge,
            regional_context,
            benchmark,
        })
    }

    pub fn search(&self, query: &str) -> Result<Vec<Facility>, DirectoryServiceError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_CHARS {
            return Ok(Vec::new());
        }
        Ok(self.repository.search(query, MAX_SEARCH_RESULTS)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CityResolutionOutcome {
    Found(Box<CityView>),
    Redirect { slug: String },
}

/// Everything a city page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView {
    #[serde(flatten)]
    pub stats: CityStats,
    pub outlook: CityOutlook,
    pub outlook_headline: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Benchmark>,
    pub rankings: RankingLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryOverview {
    pub statewide: StatewideOverview,
    pub index: CityIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityProfile {
    pub facility: Facility,
    /// Display name of the resolved city.
    pub city: String,
    pub intelligence: Option<IntelligenceRecord>,
    pub assessment: Option<GradeAssessment>,
    pub badge: Option<CompactGrade>,
    pub regional_context: Option<RegionalContext>,
    pub benchmark: Option<Benchmark>,
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no city matches '{0}'")]
    CityNotFound(String),
    #[error("facility {0} not found")]
    FacilityNotFound(FacilityId),
}

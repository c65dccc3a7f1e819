//! Aggregation of enriched facilities into per-city hubs.
//!
//! Facilities without an intelligence record are excluded from every hub so
//! partial data never skews an average. Each hub is rebuilt from scratch on
//! every call.

use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroU64;
use tracing::{debug, info};

use super::city::{slugify, CityResolution};
use super::domain::{EnhancedFacility, Facility};
use super::grade::MAX_SAFETY_SCORE;
use super::intelligence::IntelligenceLookup;
use super::rounding::{round_half_up_ratio, round_to_tenth};

/// Aggregate view of one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub name: String,
    pub slug: String,
    pub total_facilities: usize,
    pub avg_safety_score: u8,
    pub avg_violations: f64,
    /// Best-first by safety score; ties keep source order.
    pub facilities: Vec<EnhancedFacility>,
}

impl CityStats {
    pub fn summary(&self) -> CitySummary {
        CitySummary {
            name: self.name.clone(),
            slug: self.slug.clone(),
            total_facilities: self.total_facilities,
            avg_safety_score: self.avg_safety_score,
            avg_violations: self.avg_violations,
        }
    }
}

/// `CityStats` without its facility list, for index pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub name: String,
    pub slug: String,
    pub total_facilities: usize,
    pub avg_safety_score: u8,
    pub avg_violations: f64,
}

/// Result of resolving a caller-supplied city segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CityLookup<'a> {
    /// The segment already is the canonical slug.
    Canonical(&'a CityStats),
    /// The segment names a known city through a non-canonical spelling.
    Redirect { slug: &'a str },
    NotFound,
}

/// All city hubs keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CityHubs {
    cities: BTreeMap<String, CityStats>,
}

impl CityHubs {
    pub fn get(&self, slug: &str) -> Option<&CityStats> {
        self.cities.get(slug)
    }

    /// Match any spelling of a city on its slug form.
    pub fn find(&self, city: &str) -> Option<&CityStats> {
        self.cities.get(&slugify(city))
    }

    pub fn lookup(&self, segment: &str) -> CityLookup<'_> {
        match self.find(segment) {
            Some(stats) if stats.slug == segment => CityLookup::Canonical(stats),
            Some(stats) => CityLookup::Redirect { slug: &stats.slug },
            None => CityLookup::NotFound,
        }
    }

    /// Cities in slug order.
    pub fn iter(&self) -> impl Iterator<Item = &CityStats> {
        self.cities.values()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Join facilities with their intelligence and group them by city.
pub fn build_city_hubs<L>(facilities: &[Facility], intelligence: &L) -> CityHubs
where
    L: IntelligenceLookup + ?Sized,
{
    let mut groups: BTreeMap<String, CityAccumulator> = BTreeMap::new();
    let mut excluded = 0usize;

    for facility in facilities {
        let Some(record) = intelligence.facility(&facility.id) else {
            debug!(facility_id = %facility.id, "excluding facility without intelligence");
            excluded += 1;
            continue;
        };

        let display_name = CityResolution::resolve(&facility.city, &record.city).display_name();
        let slug = slugify(&display_name);
        let enriched = EnhancedFacility::new(facility.clone(), record);

        match groups.get_mut(&slug) {
            Some(group) => group.push(enriched),
            None => {
                groups.insert(slug, CityAccumulator::new(display_name, enriched));
            }
        }
    }

    let cities: BTreeMap<String, CityStats> = groups
        .into_iter()
        .map(|(slug, group)| {
            let stats = group.finish(slug.clone());
            (slug, stats)
        })
        .collect();

    info!(
        cities = cities.len(),
        facilities = facilities.len(),
        excluded,
        "built city hubs"
    );

    CityHubs { cities }
}

/// Running totals for one city. Always holds at least one facility.
struct CityAccumulator {
    name: String,
    count: NonZeroU64,
    score_total: u64,
    violation_total: u64,
    facilities: Vec<EnhancedFacility>,
}

impl CityAccumulator {
    fn new(name: String, first: EnhancedFacility) -> Self {
        Self {
            name,
            count: NonZeroU64::MIN,
            score_total: u64::from(first.safety_score().value()),
            violation_total: u64::from(first.violation_count()),
            facilities: vec![first],
        }
    }

    fn push(&mut self, facility: EnhancedFacility) {
        self.count = self.count.saturating_add(1);
        self.score_total += u64::from(facility.safety_score().value());
        self.violation_total += u64::from(facility.violation_count());
        self.facilities.push(facility);
    }

    fn finish(mut self, slug: String) -> CityStats {
        // Stable sort: equal scores keep source order.
        self.facilities
            .sort_by(|a, b| b.safety_score().cmp(&a.safety_score()));

        let avg_score = round_half_up_ratio(self.score_total, self.count);
        CityStats {
            name: self.name,
            slug,
            total_facilities: self.facilities.len(),
            avg_safety_score: u8::try_from(avg_score).unwrap_or(MAX_SAFETY_SCORE),
            avg_violations: round_to_tenth(self.violation_total, self.count),
            facilities: self.facilities,
        }
    }
}

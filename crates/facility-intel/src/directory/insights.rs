use serde::Serialize;
use std::collections::BTreeMap;
use std::num::NonZeroU64;

use super::domain::Benchmark;
use super::hubs::{CityHubs, CitySummary};
use super::rounding::{round_half_up, round_half_up_ratio};

/// City average at or above which a city reads as better than the state.
pub const STATE_AVERAGE_SCORE: u8 = 75;
/// Violations per facility assumed when a city has no usable benchmark.
pub const STATEWIDE_AVG_VIOLATIONS: f64 = 10.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CityOutlook {
    AboveStateAverage,
    SafetyAlert,
}

impl CityOutlook {
    pub fn for_score(avg_safety_score: u8) -> Self {
        if avg_safety_score >= STATE_AVERAGE_SCORE {
            Self::AboveStateAverage
        } else {
            Self::SafetyAlert
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::AboveStateAverage => "Performs better than the state average",
            Self::SafetyAlert => "Higher safety risks than the state average",
        }
    }
}

/// A facility's violation count against its city's benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalContext {
    pub violation_count: u32,
    pub regional_average: f64,
    pub benchmark_available: bool,
    pub fewer_than_average: bool,
    pub difference_pct: u32,
}

impl RegionalContext {
    pub fn compare(violation_count: u32, benchmark: Option<&Benchmark>) -> Self {
        let usable = benchmark
            .map(|benchmark| benchmark.avg_violations)
            .filter(|avg| avg.is_finite() && *avg > 0.0);
        let regional_average = usable.unwrap_or(STATEWIDE_AVG_VIOLATIONS);
        let count = f64::from(violation_count);
        let ratio = ((count - regional_average) / regional_average).abs();

        Self {
            violation_count,
            regional_average,
            benchmark_available: usable.is_some(),
            fewer_than_average: count < regional_average,
            difference_pct: u32::try_from(round_half_up(ratio * 100.0)).unwrap_or(u32::MAX),
        }
    }
}

/// Jurisdiction-wide totals derived from the city hubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatewideOverview {
    pub total_cities: usize,
    pub total_facilities: usize,
    /// Facility-weighted mean of city averages; absent when no facility is enriched.
    pub avg_safety_score: Option<u8>,
    pub total_violations: u64,
}

impl StatewideOverview {
    pub fn from_hubs(hubs: &CityHubs) -> Self {
        let total_facilities: usize = hubs.iter().map(|city| city.total_facilities).sum();
        let score_mass: u64 = hubs
            .iter()
            .map(|city| u64::from(city.avg_safety_score) * city.total_facilities as u64)
            .sum();
        let violation_mass: f64 = hubs
            .iter()
            .map(|city| city.avg_violations * city.total_facilities as f64)
            .sum();

        let avg_safety_score = NonZeroU64::new(total_facilities as u64)
            .map(|count| round_half_up_ratio(score_mass, count))
            .map(|avg| u8::try_from(avg).unwrap_or(u8::MAX));

        Self {
            total_cities: hubs.len(),
            total_facilities,
            avg_safety_score,
            total_violations: round_half_up(violation_mass),
        }
    }
}

/// Cities grouped under the first letter of their display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CityIndex {
    letters: BTreeMap<char, Vec<CitySummary>>,
}

impl CityIndex {
    pub fn from_hubs(hubs: &CityHubs) -> Self {
        let mut letters: BTreeMap<char, Vec<CitySummary>> = BTreeMap::new();
        for city in hubs.iter() {
            let Some(first) = city.name.chars().next() else {
                continue;
            };
            let letter = first.to_uppercase().next().unwrap_or(first);
            letters.entry(letter).or_default().push(city.summary());
        }

        for cities in letters.values_mut() {
            cities.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Self { letters }
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.keys().copied()
    }

    pub fn cities_under(&self, letter: char) -> &[CitySummary] {
        self.letters
            .get(&letter)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

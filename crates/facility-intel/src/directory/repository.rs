use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{Facility, FacilityId};
use super::load::DataLoadError;

/// Read access to the facility source so aggregation can run against any store.
pub trait FacilityRepository: Send + Sync {
    /// Active facilities in the configured jurisdiction, in source order.
    fn active_facilities(&self) -> Result<Vec<Facility>, RepositoryError>;
    fn fetch(&self, id: &FacilityId) -> Result<Option<Facility>, RepositoryError>;
    /// Case-insensitive substring match on name, city, or identifier.
    fn search(&self, needle: &str, limit: usize) -> Result<Vec<Facility>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Facility snapshot read from a CSV export (`id,name,city,state,total_beds`).
#[derive(Debug, Clone)]
pub struct CsvFacilityRepository {
    facilities: Vec<Facility>,
    jurisdiction: String,
}

impl CsvFacilityRepository {
    pub fn from_path<P: AsRef<Path>>(path: P, jurisdiction: &str) -> Result<Self, DataLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, jurisdiction)
    }

    pub fn from_reader<R: Read>(reader: R, jurisdiction: &str) -> Result<Self, DataLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut facilities = Vec::new();

        for row in csv_reader.deserialize::<FacilityRow>() {
            facilities.push(row?.into_facility());
        }

        Ok(Self::new(facilities, jurisdiction))
    }

    pub fn new(facilities: Vec<Facility>, jurisdiction: &str) -> Self {
        Self {
            facilities,
            jurisdiction: jurisdiction.trim().to_ascii_uppercase(),
        }
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl FacilityRepository for CsvFacilityRepository {
    fn active_facilities(&self) -> Result<Vec<Facility>, RepositoryError> {
        Ok(self
            .facilities
            .iter()
            .filter(|facility| facility.state.eq_ignore_ascii_case(&self.jurisdiction))
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &FacilityId) -> Result<Option<Facility>, RepositoryError> {
        Ok(self
            .facilities
            .iter()
            .find(|facility| &facility.id == id)
            .cloned())
    }

    fn search(&self, needle: &str, limit: usize) -> Result<Vec<Facility>, RepositoryError> {
        let needle = needle.to_lowercase();
        Ok(self
            .facilities
            .iter()
            .filter(|facility| {
                [&facility.name, &facility.city, &facility.id.0]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct FacilityRow {
    id: String,
    name: String,
    #[serde(default)]
    city: Option<String>,
    state: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_beds: Option<String>,
}

impl FacilityRow {
    fn into_facility(self) -> Facility {
        Facility {
            id: FacilityId(self.id),
            name: self.name,
            city: self.city.unwrap_or_default(),
            state: self.state,
            total_beds: self.total_beds.and_then(|beds| beds.parse().ok()),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

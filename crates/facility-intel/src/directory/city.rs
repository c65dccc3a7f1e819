//! City name canonicalization.
//!
//! Facility and intelligence sources disagree on casing and spacing for the
//! same city. Every comparison between cities goes through [`slugify`]; the
//! title-cased form is for display only.

/// Bucket name for facilities whose city cannot be resolved from either source.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Title-case each whitespace-delimited token and collapse whitespace runs.
///
/// `"SAN  ANTONIO "` becomes `"San Antonio"`. Idempotent.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_case_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_token(token: &str) -> String {
    // Leading punctuation such as "(" is kept verbatim; casing starts at the
    // first letter or digit.
    let Some(start) = token.find(char::is_alphanumeric) else {
        return token.to_string();
    };
    let (prefix, word) = token.split_at(start);
    let mut chars = word.chars();
    let mut cased = String::with_capacity(token.len());
    cased.push_str(prefix);

    if let Some(first) = chars.next() {
        let mut upper = first.to_uppercase();
        // Characters whose uppercase form expands (e.g. 'ß') are kept as-is so
        // the transformation stays idempotent.
        match (upper.next(), upper.next()) {
            (Some(single), None) => cased.push(single),
            _ => cased.push(first),
        }
    }
    cased.extend(chars.flat_map(char::to_lowercase));
    cased
}

/// Lowercase and join whitespace-separated tokens with single hyphens.
///
/// `"San Antonio"`, `"san-antonio"` and `"SAN ANTONIO"` all map to `"san-antonio"`.
pub fn slugify(display: &str) -> String {
    display
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Outcome of choosing which source supplies a facility's city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityResolution {
    Resolved(String),
    Unknown,
}

impl CityResolution {
    /// Prefer the facility record's city, then the intelligence copy.
    pub fn resolve(facility_city: &str, intelligence_city: &str) -> Self {
        [facility_city, intelligence_city]
            .into_iter()
            .find(|candidate| !candidate.trim().is_empty())
            .map(|city| Self::Resolved(city.to_string()))
            .unwrap_or(Self::Unknown)
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Resolved(raw) => title_case(raw),
            Self::Unknown => UNKNOWN_CITY.to_string(),
        }
    }
}

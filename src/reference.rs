//! Reference Data Lookup
//!
//! Static country/airport table, loaded once and never mutated. Unknown codes
//! are not fatal: lookups return `None` or an empty airport list.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::{Airport, Country};
use crate::{Result, TravelPlannerError};

const EMBEDDED_COUNTRIES: &str = include_str!("../data/countries.json");

#[derive(Debug, Deserialize)]
struct CountriesFile {
    countries: Vec<Country>,
}

/// Immutable country → airports table
#[derive(Debug, Clone)]
pub struct ReferenceData {
    countries: Vec<Country>,
    index: HashMap<String, usize>,
}

impl ReferenceData {
    /// Table bundled with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_COUNTRIES)
    }

    /// Load a replacement table with the same `{ "countries": [...] }` shape
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading reference data from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CountriesFile = serde_json::from_str(raw).map_err(|e| {
            TravelPlannerError::validation(format!("Invalid reference data: {e}"))
        })?;
        Self::from_countries(file.countries)
    }

    /// Build from already parsed records, rejecting duplicate country codes
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        let mut index = HashMap::with_capacity(countries.len());
        for (position, country) in countries.iter().enumerate() {
            if index.insert(country.code.clone(), position).is_some() {
                return Err(TravelPlannerError::validation(format!(
                    "Duplicate country code '{}' in reference data",
                    country.code
                )));
            }
        }

        debug!("Reference data holds {} countries", countries.len());
        Ok(Self { countries, index })
    }

    /// All countries in dataset order
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn find_country(&self, code: &str) -> Option<&Country> {
        self.index.get(code).map(|&position| &self.countries[position])
    }

    /// Like [`find_country`](Self::find_country) but reports a miss as an error
    pub fn require_country(&self, code: &str) -> Result<&Country> {
        self.find_country(code)
            .ok_or_else(|| TravelPlannerError::reference_miss(code))
    }

    /// Airports of a country; empty if the country is unknown or has none
    #[must_use]
    pub fn airports_of(&self, country_code: &str) -> &[Airport] {
        self.find_country(country_code)
            .map(|country| country.airports.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn find_airport(&self, country_code: &str, airport_code: &str) -> Option<&Airport> {
        self.find_country(country_code)
            .and_then(|country| country.airport(airport_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_loads() {
        let data = ReferenceData::embedded().unwrap();
        assert!(!data.countries().is_empty());
        assert_eq!(data.countries()[0].code, "US");
        assert_eq!(data.find_country("FR").unwrap().name, "France");
    }

    #[test]
    fn test_airports_of_preserves_order() {
        let data = ReferenceData::embedded().unwrap();
        let codes: Vec<&str> = data.airports_of("FR").iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "NCE", "LYS"]);
    }

    #[test]
    fn test_unknown_country_yields_empty_list() {
        let data = ReferenceData::embedded().unwrap();
        assert!(data.find_country("ZZ").is_none());
        assert!(data.airports_of("ZZ").is_empty());
        assert!(data.airports_of("").is_empty());
    }

    #[test]
    fn test_country_without_airports() {
        let data = ReferenceData::embedded().unwrap();
        assert!(data.find_country("MC").is_some());
        assert!(data.airports_of("MC").is_empty());
    }

    #[test]
    fn test_require_country_reports_miss() {
        let data = ReferenceData::embedded().unwrap();
        let err = data.require_country("ZZ").unwrap_err();
        assert!(matches!(err, TravelPlannerError::ReferenceDataMiss { ref code } if code == "ZZ"));
    }

    #[test]
    fn test_find_airport_is_scoped_to_country() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.find_airport("FR", "CDG").unwrap().city, "Paris");
        assert!(data.find_airport("US", "CDG").is_none());
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let raw = r#"{"countries":[{"code":"FR","name":"France"},{"code":"FR","name":"Again"}]}"#;
        let err = ReferenceData::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("Duplicate country code 'FR'"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ReferenceData::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TravelPlannerError::Validation { .. }));
    }
}

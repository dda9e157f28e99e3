//! Country and airport reference records

use serde::{Deserialize, Serialize};

/// A country with its ordered list of airports
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Country {
    /// Country code, unique within the dataset
    pub code: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub airports: Vec<Airport>,
}

impl Country {
    /// Airport with the given code, if this country has one
    #[must_use]
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.iter().find(|airport| airport.code == code)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Airport {
    /// IATA code
    pub code: String,
    pub city: String,
}

impl Airport {
    #[must_use]
    pub fn to_ref(&self) -> AirportRef {
        AirportRef {
            code: self.code.clone(),
            city: self.city.clone(),
        }
    }

    /// Selector label, e.g. `CDG - Paris`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.city)
    }
}

/// Airport code and city travelling together, so a destination selection
/// can never pair a code with another airport's city.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AirportRef {
    pub code: String,
    pub city: String,
}

impl From<&Airport> for AirportRef {
    fn from(airport: &Airport) -> Self {
        airport.to_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn france() -> Country {
        Country {
            code: "FR".to_string(),
            name: "France".to_string(),
            airports: vec![
                Airport {
                    code: "CDG".to_string(),
                    city: "Paris".to_string(),
                },
                Airport {
                    code: "NCE".to_string(),
                    city: "Nice".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_airport_lookup_within_country() {
        let country = france();
        assert_eq!(country.airport("NCE").map(|a| a.city.as_str()), Some("Nice"));
        assert!(country.airport("JFK").is_none());
    }

    #[test]
    fn test_airport_ref_carries_code_and_city() {
        let country = france();
        let airport_ref = AirportRef::from(&country.airports[0]);
        assert_eq!(airport_ref.code, "CDG");
        assert_eq!(airport_ref.city, "Paris");
        assert_eq!(country.airports[0].label(), "CDG - Paris");
    }

    #[test]
    fn test_missing_airports_deserialize_as_empty() {
        let country: Country = serde_json::from_str(r#"{"code":"MC","name":"Monaco"}"#).unwrap();
        assert!(country.airports.is_empty());
    }
}

//! Selection State
//!
//! The user's current choices. Every field is a string where empty means
//! unset; mutations go through the named setters so the country/airport
//! invariant holds: changing a country always clears the airport chosen
//! under the previous one.

use serde::{Deserialize, Serialize};

use crate::models::AirportRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    origin_country: String,
    origin_airport: String,
    departure_date: String,
    destination_country: String,
    destination_airport: String,
    destination_city: String,
}

/// The four fields whose joint non-emptiness gates a lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatingFields {
    pub origin_airport: String,
    pub destination_airport: String,
    pub departure_date: String,
    pub destination_city: String,
}

/// A satisfied gate: everything needed to run both lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub origin_airport: String,
    pub destination_airport: String,
    pub departure_date: String,
    pub destination_city: String,
}

impl GatingFields {
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        !self.origin_airport.is_empty()
            && !self.destination_airport.is_empty()
            && !self.departure_date.is_empty()
            && !self.destination_city.is_empty()
    }

    #[must_use]
    pub fn to_request(&self) -> Option<FetchRequest> {
        self.is_satisfied().then(|| FetchRequest {
            origin_airport: self.origin_airport.clone(),
            destination_airport: self.destination_airport.clone(),
            departure_date: self.departure_date.clone(),
            destination_city: self.destination_city.clone(),
        })
    }
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin_country(&self) -> &str {
        &self.origin_country
    }

    pub fn origin_airport(&self) -> &str {
        &self.origin_airport
    }

    pub fn departure_date(&self) -> &str {
        &self.departure_date
    }

    pub fn destination_country(&self) -> &str {
        &self.destination_country
    }

    pub fn destination_airport(&self) -> &str {
        &self.destination_airport
    }

    pub fn destination_city(&self) -> &str {
        &self.destination_city
    }

    /// Select the origin country; the origin airport is cleared
    pub fn set_origin_country(&mut self, code: impl Into<String>) {
        self.origin_country = code.into();
        self.origin_airport.clear();
    }

    pub fn set_origin_airport(&mut self, code: impl Into<String>) {
        self.origin_airport = code.into();
    }

    /// Select the destination country; destination airport and city are cleared
    pub fn set_destination_country(&mut self, code: impl Into<String>) {
        self.destination_country = code.into();
        self.destination_airport.clear();
        self.destination_city.clear();
    }

    /// Select the destination airport and its city in one step
    pub fn set_destination_airport(&mut self, airport: AirportRef) {
        self.destination_airport = airport.code;
        self.destination_city = airport.city;
    }

    pub fn clear_destination_airport(&mut self) {
        self.destination_airport.clear();
        self.destination_city.clear();
    }

    /// Store the departure date as given; malformed dates are passed through
    /// to the lookup unchanged
    pub fn set_departure_date(&mut self, date: impl Into<String>) {
        self.departure_date = date.into();
    }

    #[must_use]
    pub fn gating_fields(&self) -> GatingFields {
        GatingFields {
            origin_airport: self.origin_airport.clone(),
            destination_airport: self.destination_airport.clone(),
            departure_date: self.departure_date.clone(),
            destination_city: self.destination_city.clone(),
        }
    }

    #[must_use]
    pub fn fetch_request(&self) -> Option<FetchRequest> {
        self.gating_fields().to_request()
    }
}

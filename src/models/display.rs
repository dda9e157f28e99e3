//! Display model derived from a completed fetch cycle

use serde::{Deserialize, Serialize};

use super::{FlightLeg, MAX_FLIGHT_LEGS, WeatherSummary};
use crate::error::ErrorKind;

/// Lifecycle of the flight + weather lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchStatus {
    /// Gate never satisfied, or the in-flight cycle was invalidated
    #[default]
    Idle,
    Loading,
    Done,
    Failed { kind: ErrorKind },
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

/// What the result panels show
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub weather: Option<WeatherSummary>,
    /// Up to [`MAX_FLIGHT_LEGS`] legs, in source order
    pub flights: Vec<FlightLeg>,
    /// First leg, kept for single-result display
    pub headline: Option<FlightLeg>,
}

impl DisplayModel {
    /// Build from a full flight list, keeping the first legs only
    #[must_use]
    pub fn new(mut flights: Vec<FlightLeg>, weather: WeatherSummary) -> Self {
        flights.truncate(MAX_FLIGHT_LEGS);
        let headline = flights.first().cloned();
        Self {
            weather: Some(weather),
            flights,
            headline,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weather.is_none() && self.flights.is_empty()
    }
}

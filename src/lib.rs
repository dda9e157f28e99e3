//! Travel Planner - flight timings and destination weather for a planned trip
//!
//! A cascading origin/destination form over a static country and airport
//! table. Once origin airport, destination airport, destination city and
//! departure date are all chosen, the scheduled flights and the current
//! destination weather are fetched concurrently and reduced into a display
//! model.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod reference;
pub mod render;
pub mod selection;
pub mod session;
pub mod timing;

// Re-export core types for public API
pub use api::{AviationStackClient, FlightScheduleProvider, WeatherProvider, WeatherStackClient};
pub use config::TravelPlannerConfig;
pub use error::{ErrorKind, Service, TravelPlannerError};
pub use models::{Airport, AirportRef, Country, DisplayModel, FetchStatus, FlightLeg, WeatherSummary};
pub use orchestrator::FetchOrchestrator;
pub use planner::{Action, FetchTicket, Planner, PlannerSnapshot};
pub use reference::ReferenceData;
pub use render::FormView;
pub use selection::{FetchRequest, SelectionState};
pub use session::{PlannerSession, SessionHandle};
pub use timing::{elapsed_duration, time_difference};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelPlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

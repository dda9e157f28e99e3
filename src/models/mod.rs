//! Data models for the travel planner
//!
//! This module contains the core domain models organized by concern:
//! - Country: Static country and airport reference records
//! - Flight: Flight legs reduced from schedule lookups
//! - Weather: Destination weather summary
//! - Display: The derived display model and fetch status

pub mod country;
pub mod display;
pub mod flight;
pub mod weather;

// Re-export all public types for convenient access
pub use country::{Airport, AirportRef, Country};
pub use display::{DisplayModel, FetchStatus};
pub use flight::{FlightLeg, MAX_FLIGHT_LEGS};
pub use weather::WeatherSummary;

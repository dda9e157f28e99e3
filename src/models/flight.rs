//! Flight legs reduced from schedule lookups

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::timing;

/// Upper bound on legs kept in the display model
pub const MAX_FLIGHT_LEGS: usize = 3;

/// Scheduled departure/arrival clock times of one flight
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FlightLeg {
    /// Departure time, `HH:MM` (24h)
    pub departure_time: String,
    /// Arrival time, `HH:MM` (24h)
    pub arrival_time: String,
}

impl FlightLeg {
    #[must_use]
    pub fn new<S: Into<String>>(departure_time: S, arrival_time: S) -> Self {
        Self {
            departure_time: departure_time.into(),
            arrival_time: arrival_time.into(),
        }
    }

    /// Time in the air, rolling over midnight for overnight legs
    pub fn elapsed(&self) -> Result<String> {
        timing::elapsed_duration(&self.departure_time, &self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_overnight_leg() {
        let leg = FlightLeg::new("23:10", "05:40");
        assert_eq!(leg.elapsed().unwrap(), "6 hours and 30 minutes");
    }

    #[test]
    fn test_elapsed_rejects_garbage() {
        let leg = FlightLeg::new("soon", "05:40");
        assert!(leg.elapsed().is_err());
    }
}

//! Destination weather summary and display methods

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current conditions at the destination, copied from the weather lookup
/// without unit conversion
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSummary {
    /// Resolved location name
    pub location_name: String,
    pub country: String,
    /// Local time at the location, `YYYY-MM-DD HH:MM`
    pub localtime: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// First condition icon, empty if none was returned
    pub icon_url: String,
    /// First condition description, empty if none was returned
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: f64,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// Visibility in kilometers
    pub visibility_km: f64,
    /// Apparent temperature in Celsius
    pub feels_like_c: f64,
}

impl WeatherSummary {
    /// Local month and two-digit year, e.g. `Jun 25`.
    ///
    /// Falls back to the raw string when it is not in the expected layout.
    #[must_use]
    pub fn format_local_month(&self) -> String {
        NaiveDateTime::parse_from_str(&self.localtime, "%Y-%m-%d %H:%M")
            .map(|dt| dt.format("%b %y").to_string())
            .unwrap_or_else(|_| self.localtime.clone())
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("{}°C", self.feels_like_c)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} km/h", self.wind_kmh)
    }

    #[must_use]
    pub fn format_visibility(&self) -> String {
        format!("{} km", self.visibility_km)
    }
}

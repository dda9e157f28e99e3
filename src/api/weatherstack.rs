//! weatherstack current-conditions client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::{WeatherProvider, get_json};
use crate::config::{ApiKey, ServiceConfig};
use crate::error::Service;
use crate::models::WeatherSummary;
use crate::{Result, TravelPlannerError};

/// Weather lookup against `{base_url}/current`
pub struct WeatherStackClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl WeatherStackClient {
    pub fn new(config: &ServiceConfig, api_key: ApiKey) -> Result<Self> {
        Ok(Self {
            client: super::build_client(config.timeout_seconds)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn current_url(&self, city: &str) -> String {
        format!(
            "{}/current?access_key={}&query={}",
            self.base_url,
            urlencoding::encode(self.api_key.expose()),
            urlencoding::encode(city)
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherStackClient {
    #[instrument(name = "current_weather", skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSummary> {
        let response: wire::CurrentResponse =
            get_json(&self.client, Service::Weather, &self.current_url(city)).await?;

        let summary = response.into_summary()?;
        info!(
            "Current weather for {}: {}°C, {}",
            summary.location_name, summary.temperature_c, summary.description
        );
        Ok(summary)
    }
}

/// Decode a `current` body; exposed for fixtures and alternate transports
pub fn parse_current(body: &str) -> Result<WeatherSummary> {
    let response: wire::CurrentResponse = serde_json::from_str(body)
        .map_err(|e| TravelPlannerError::parse(Service::Weather, e.to_string()))?;
    response.into_summary()
}

/// weatherstack response structures
mod wire {
    use serde::Deserialize;

    use crate::error::Service;
    use crate::models::WeatherSummary;
    use crate::{Result, TravelPlannerError};

    /// weatherstack answers errors with HTTP 200 and `success: false`
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub success: Option<bool>,
        pub error: Option<ApiError>,
        pub location: Option<Location>,
        pub current: Option<Current>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ApiError {
        pub code: Option<u16>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub info: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Location {
        pub name: String,
        pub country: String,
        pub localtime: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Current {
        pub temperature: f64,
        #[serde(default)]
        pub weather_icons: Vec<String>,
        #[serde(default)]
        pub weather_descriptions: Vec<String>,
        pub humidity: f64,
        pub wind_speed: f64,
        pub visibility: f64,
        pub feelslike: f64,
    }

    impl ApiError {
        /// Map weatherstack error codes onto HTTP-like statuses
        fn status(&self) -> u16 {
            match self.code {
                // missing or invalid access key, inactive user
                Some(101 | 102) => 401,
                // monthly usage limit reached
                Some(104) => 429,
                Some(615) => 502,
                _ => 400,
            }
        }
    }

    impl CurrentResponse {
        pub fn into_summary(self) -> Result<WeatherSummary> {
            if self.success == Some(false) || self.error.is_some() {
                let (status, message) = match &self.error {
                    Some(error) => (
                        error.status(),
                        format!(
                            "{}: {}",
                            error.kind.as_deref().unwrap_or("unknown_error"),
                            error.info.as_deref().unwrap_or_default()
                        ),
                    ),
                    None => (400, "request was not successful".to_string()),
                };
                return Err(TravelPlannerError::http(Service::Weather, status, message));
            }

            let location = self.location.ok_or_else(|| {
                TravelPlannerError::parse(Service::Weather, "missing field `location`")
            })?;
            let current = self.current.ok_or_else(|| {
                TravelPlannerError::parse(Service::Weather, "missing field `current`")
            })?;

            Ok(WeatherSummary {
                location_name: location.name,
                country: location.country,
                localtime: location.localtime,
                temperature_c: current.temperature,
                icon_url: current.weather_icons.into_iter().next().unwrap_or_default(),
                description: current
                    .weather_descriptions
                    .into_iter()
                    .next()
                    .unwrap_or_default(),
                humidity_pct: current.humidity,
                wind_kmh: current.wind_speed,
                visibility_km: current.visibility,
                feels_like_c: current.feelslike,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TravelPlannerConfig;

    const PARIS: &str = r#"{
        "request": {"type": "City", "query": "Paris, France", "language": "en", "unit": "m"},
        "location": {
            "name": "Paris", "country": "France", "region": "Ile-de-France",
            "lat": "48.867", "lon": "2.333", "timezone_id": "Europe/Paris",
            "localtime": "2025-06-01 14:05", "localtime_epoch": 1748786700, "utc_offset": "2.0"
        },
        "current": {
            "observation_time": "12:05 PM", "temperature": 21, "weather_code": 113,
            "weather_icons": ["https://cdn.worldweatheronline.com/images/wsymbols01_png_64/wsymbol_0001_sunny.png"],
            "weather_descriptions": ["Sunny"], "wind_speed": 13, "wind_degree": 250,
            "wind_dir": "WSW", "pressure": 1016, "precip": 0, "humidity": 48,
            "cloudcover": 0, "feelslike": 22, "uv_index": 6, "visibility": 10
        }
    }"#;

    #[test]
    fn test_current_url_encodes_city() {
        let config = TravelPlannerConfig::with_defaults();
        let client = WeatherStackClient::new(&config.weather, ApiKey::new("key")).unwrap();
        assert_eq!(
            client.current_url("Paris"),
            "http://api.weatherstack.com/current?access_key=key&query=Paris"
        );
        assert!(client.current_url("Rio de Janeiro").ends_with("query=Rio%20de%20Janeiro"));
    }

    #[test]
    fn test_parse_current_maps_fields_without_conversion() {
        let summary = parse_current(PARIS).unwrap();
        assert_eq!(summary.location_name, "Paris");
        assert_eq!(summary.country, "France");
        assert_eq!(summary.localtime, "2025-06-01 14:05");
        assert_eq!(summary.temperature_c, 21.0);
        assert_eq!(summary.description, "Sunny");
        assert!(summary.icon_url.ends_with("wsymbol_0001_sunny.png"));
        assert_eq!(summary.humidity_pct, 48.0);
        assert_eq!(summary.wind_kmh, 13.0);
        assert_eq!(summary.visibility_km, 10.0);
        assert_eq!(summary.feels_like_c, 22.0);
    }

    #[test]
    fn test_empty_icon_and_description_lists() {
        let body = PARIS
            .replace(
                r#"["https://cdn.worldweatheronline.com/images/wsymbols01_png_64/wsymbol_0001_sunny.png"]"#,
                "[]",
            )
            .replace(r#"["Sunny"]"#, "[]");
        let summary = parse_current(&body).unwrap();
        assert_eq!(summary.icon_url, "");
        assert_eq!(summary.description, "");
    }

    #[test]
    fn test_error_envelope_is_http_error() {
        let body = r#"{"success": false, "error": {"code": 101, "type": "invalid_access_key", "info": "You have not supplied a valid API Access Key."}}"#;
        match parse_current(body).unwrap_err() {
            TravelPlannerError::Http {
                service,
                status,
                message,
            } => {
                assert_eq!(service, Service::Weather);
                assert_eq!(status, 401);
                assert!(message.starts_with("invalid_access_key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_sections_are_parse_errors() {
        let err = parse_current(r#"{"location": {"name": "Paris", "country": "France", "localtime": "x"}}"#)
            .unwrap_err();
        assert!(matches!(err, TravelPlannerError::Parse { .. }));
        assert!(err.to_string().contains("current"));
    }
}

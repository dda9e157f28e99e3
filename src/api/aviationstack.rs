//! aviationstack future-schedule client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::{FlightScheduleProvider, ScheduleEntry, get_json};
use crate::config::{ApiKey, ServiceConfig};
use crate::error::Service;
use crate::{Result, TravelPlannerError};

/// Flight schedule lookup against `{base_url}/flightsFuture`
pub struct AviationStackClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl AviationStackClient {
    pub fn new(config: &ServiceConfig, api_key: ApiKey) -> Result<Self> {
        Ok(Self {
            client: super::build_client(config.timeout_seconds)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Query string without the access key, e.g. for logs and tests
    #[must_use]
    pub fn schedule_query(iata_code: &str, date: &str) -> String {
        format!(
            "iataCode={}&type=arrival&date={}",
            urlencoding::encode(iata_code),
            urlencoding::encode(date)
        )
    }

    fn schedule_url(&self, iata_code: &str, date: &str) -> String {
        format!(
            "{}/flightsFuture?{}&access_key={}",
            self.base_url,
            Self::schedule_query(iata_code, date),
            urlencoding::encode(self.api_key.expose())
        )
    }
}

#[async_trait]
impl FlightScheduleProvider for AviationStackClient {
    #[instrument(name = "flight_schedule", skip(self))]
    async fn scheduled_flights(&self, iata_code: &str, date: &str) -> Result<Vec<ScheduleEntry>> {
        let response: wire::FutureSchedulesResponse = get_json(
            &self.client,
            Service::FlightSchedule,
            &self.schedule_url(iata_code, date),
        )
        .await?;

        let entries = response.into_entries()?;
        info!("Found {} scheduled flights", entries.len());
        Ok(entries)
    }
}

/// Decode a `flightsFuture` body; exposed for fixtures and alternate transports
pub fn parse_schedule(body: &str) -> Result<Vec<ScheduleEntry>> {
    let response: wire::FutureSchedulesResponse = serde_json::from_str(body)
        .map_err(|e| TravelPlannerError::parse(Service::FlightSchedule, e.to_string()))?;
    response.into_entries()
}

/// aviationstack response structures
mod wire {
    use serde::Deserialize;

    use super::ScheduleEntry;
    use crate::error::Service;
    use crate::{Result, TravelPlannerError};

    #[derive(Debug, Deserialize)]
    pub struct FutureSchedulesResponse {
        pub data: Option<Vec<FutureFlight>>,
        pub error: Option<ApiError>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ApiError {
        pub code: Option<String>,
        pub message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct FutureFlight {
        pub departure: Option<Endpoint>,
        pub arrival: Option<Endpoint>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Endpoint {
        #[serde(rename = "scheduledTime")]
        pub scheduled_time: Option<String>,
    }

    impl FutureSchedulesResponse {
        pub fn into_entries(self) -> Result<Vec<ScheduleEntry>> {
            if let Some(error) = self.error {
                let code = error.code.unwrap_or_else(|| "unknown_error".to_string());
                let message = error.message.unwrap_or_default();
                let status = if code.contains("access_key") { 401 } else { 400 };
                return Err(TravelPlannerError::http(
                    Service::FlightSchedule,
                    status,
                    format!("{code}: {message}"),
                ));
            }

            Ok(self
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|flight| ScheduleEntry {
                    departure_time: flight.departure.and_then(|d| d.scheduled_time),
                    arrival_time: flight.arrival.and_then(|a| a.scheduled_time),
                })
                .collect())
        }
    }
}

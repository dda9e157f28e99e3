//! Clients for the two remote collaborators
//!
//! Both lookups sit behind a provider trait so the orchestrator can be driven
//! by in-process fakes. The HTTP implementations share [`get_json`], which
//! maps transport failures, non-success statuses and undecodable bodies onto
//! the crate error type.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::Service;
use crate::models::WeatherSummary;
use crate::{Result, TravelPlannerError};

pub mod aviationstack;
pub mod weatherstack;

pub use aviationstack::AviationStackClient;
pub use weatherstack::WeatherStackClient;

const USER_AGENT: &str = concat!("travel-planner/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in an error message
const ERROR_BODY_LIMIT: usize = 200;

/// One entry of a schedule lookup, before reduction to a flight leg
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[async_trait]
pub trait FlightScheduleProvider: Send + Sync {
    /// Scheduled arrivals at `iata_code` on `date`, in source order.
    /// An empty list means no flights, not an error.
    async fn scheduled_flights(&self, iata_code: &str, date: &str) -> Result<Vec<ScheduleEntry>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city name
    async fn current_weather(&self, city: &str) -> Result<WeatherSummary>;
}

pub(crate) fn build_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TravelPlannerError::config(format!("Failed to create HTTP client: {e}")))
}

/// GET `url` and decode the JSON body.
///
/// `url` carries the access key, so it is never logged and is stripped from
/// reqwest errors before they are wrapped.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    service: Service,
    url: &str,
) -> Result<T> {
    let start_time = Instant::now();

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            TravelPlannerError::timeout(service)
        } else {
            TravelPlannerError::transport(service, e.without_url().to_string())
        }
    })?;

    let status = response.status();
    debug!(
        "{} responded {} in {:.3}s",
        service,
        status,
        start_time.elapsed().as_secs_f64()
    );

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            TravelPlannerError::timeout(service)
        } else {
            TravelPlannerError::transport(service, e.without_url().to_string())
        }
    })?;

    if !status.is_success() {
        warn!("{} request failed with status {}", service, status);
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            truncate(&body, ERROR_BODY_LIMIT)
        };
        return Err(TravelPlannerError::http(service, status.as_u16(), message));
    }

    serde_json::from_str(&body).map_err(|e| TravelPlannerError::parse(service, e.to_string()))
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

//! Fetch Orchestrator
//!
//! Runs the flight schedule and weather lookups for a satisfied gate as two
//! concurrent futures, waits for both to settle, and reduces the results into
//! a [`DisplayModel`]. A failure on either side fails the whole cycle.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::api::{
    AviationStackClient, FlightScheduleProvider, ScheduleEntry, WeatherProvider,
    WeatherStackClient,
};
use crate::config::TravelPlannerConfig;
use crate::error::Service;
use crate::models::{DisplayModel, FlightLeg, MAX_FLIGHT_LEGS};
use crate::selection::FetchRequest;
use crate::{Result, TravelPlannerError};

#[derive(Clone)]
pub struct FetchOrchestrator {
    flights: Arc<dyn FlightScheduleProvider>,
    weather: Arc<dyn WeatherProvider>,
    timeout: Duration,
}

impl FetchOrchestrator {
    pub fn new(
        flights: Arc<dyn FlightScheduleProvider>,
        weather: Arc<dyn WeatherProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            flights,
            weather,
            timeout,
        }
    }

    /// Orchestrator backed by the aviationstack and weatherstack clients
    pub fn from_config(config: &TravelPlannerConfig) -> anyhow::Result<Self> {
        let (flights_key, weather_key) = config.require_api_keys()?;
        let flights = AviationStackClient::new(&config.flights, flights_key)?;
        let weather = WeatherStackClient::new(&config.weather, weather_key)?;

        Ok(Self::new(
            Arc::new(flights),
            Arc::new(weather),
            Duration::from_secs(config.fetch.timeout_seconds.into()),
        ))
    }

    /// Run both lookups and reduce them.
    ///
    /// Both futures are polled to completion before returning, so a fast
    /// failure on one side never leaves the other one dangling.
    #[instrument(
        name = "fetch_cycle",
        skip(self, request),
        fields(
            origin = %request.origin_airport,
            destination = %request.destination_airport,
            date = %request.departure_date,
        )
    )]
    pub async fn execute(&self, request: &FetchRequest) -> Result<DisplayModel> {
        let start_time = Instant::now();

        let flights = bounded(
            Service::FlightSchedule,
            self.timeout,
            self.flights
                .scheduled_flights(&request.origin_airport, &request.departure_date),
        );
        let weather = bounded(
            Service::Weather,
            self.timeout,
            self.weather.current_weather(&request.destination_city),
        );

        let (flights, weather) = tokio::join!(flights, weather);

        let outcome = match (flights, weather) {
            (Ok(entries), Ok(weather)) => {
                reduce_schedule(&entries).map(|legs| DisplayModel::new(legs, weather))
            }
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(flights_err), Err(weather_err)) => {
                warn!("Weather lookup also failed: {}", weather_err);
                Err(flights_err)
            }
        };

        match &outcome {
            Ok(model) => info!(
                "Fetch cycle finished in {:.3}s with {} flights",
                start_time.elapsed().as_secs_f64(),
                model.flights.len()
            ),
            Err(e) => warn!(
                "Fetch cycle failed after {:.3}s: {}",
                start_time.elapsed().as_secs_f64(),
                e
            ),
        }

        outcome
    }
}

async fn bounded<T>(
    service: Service,
    timeout: Duration,
    lookup: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, lookup).await {
        Ok(result) => result,
        Err(_) => {
            debug!("{} lookup exceeded {:?}", service, timeout);
            Err(TravelPlannerError::timeout(service))
        }
    }
}

/// Keep the first [`MAX_FLIGHT_LEGS`] entries, in source order, as flight legs.
///
/// Entries past the cut are never inspected; a kept entry without both
/// scheduled times is a parse error.
pub fn reduce_schedule(entries: &[ScheduleEntry]) -> Result<Vec<FlightLeg>> {
    entries
        .iter()
        .take(MAX_FLIGHT_LEGS)
        .enumerate()
        .map(|(position, entry)| {
            match (&entry.departure_time, &entry.arrival_time) {
                (Some(departure), Some(arrival)) => {
                    Ok(FlightLeg::new(departure.clone(), arrival.clone()))
                }
                _ => Err(TravelPlannerError::parse(
                    Service::FlightSchedule,
                    format!("flight {position} is missing a scheduled time"),
                )),
            }
        })
        .collect()
}

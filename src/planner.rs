//! Planner controller
//!
//! Owns the selection, the display model and the fetch status. Inputs arrive
//! as [`Action`]s; when an action changes the gating fields and the gate is
//! satisfied, the planner hands out a [`FetchTicket`]. Results are applied
//! through [`Planner::complete`], which drops any ticket that has been
//! superseded by a later gating change.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::{Airport, AirportRef, DisplayModel, FetchStatus};
use crate::orchestrator::FetchOrchestrator;
use crate::reference::ReferenceData;
use crate::selection::{FetchRequest, GatingFields, SelectionState};
use crate::{Result, TravelPlannerError};

/// A user input, one per form control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    SelectOriginCountry(String),
    SelectOriginAirport(String),
    SelectDepartureDate(String),
    SelectDestinationCountry(String),
    /// `None` resets the destination airport selector
    SelectDestinationAirport(Option<AirportRef>),
}

/// One fetch cycle, valid until the next gating-field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    request: FetchRequest,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

/// Everything the presentation layer renders from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerSnapshot {
    pub selection: SelectionState,
    pub display: DisplayModel,
    pub status: FetchStatus,
    /// User-facing message of the last failed cycle
    pub last_error: Option<String>,
    pub generation: u64,
}

pub struct Planner {
    reference: Arc<ReferenceData>,
    selection: SelectionState,
    display: DisplayModel,
    status: FetchStatus,
    last_error: Option<String>,
    generation: u64,
    gating: GatingFields,
}

impl Planner {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            selection: SelectionState::new(),
            display: DisplayModel::default(),
            status: FetchStatus::Idle,
            last_error: None,
            generation: 0,
            gating: GatingFields::default(),
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn display(&self) -> &DisplayModel {
        &self.display
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Bumped on every gating-field change
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Airports offered for the selected origin country
    pub fn origin_airports(&self) -> &[Airport] {
        self.reference.airports_of(self.selection.origin_country())
    }

    /// Airports offered for the selected destination country
    pub fn destination_airports(&self) -> &[Airport] {
        self.reference.airports_of(self.selection.destination_country())
    }

    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            selection: self.selection.clone(),
            display: self.display.clone(),
            status: self.status,
            last_error: self.last_error.clone(),
            generation: self.generation,
        }
    }

    /// Apply an input.
    ///
    /// Airports must come from the selected country's list; anything else is
    /// rejected and leaves the state unchanged. Returns a ticket when the
    /// input starts a new fetch cycle.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<FetchTicket>> {
        debug!("Dispatching {:?}", action);

        match action {
            Action::SelectOriginCountry(code) => self.selection.set_origin_country(code),
            Action::SelectOriginAirport(code) => {
                self.check_airport(self.selection.origin_country(), &code, None)?;
                self.selection.set_origin_airport(code);
            }
            Action::SelectDepartureDate(date) => {
                if !date.is_empty() && chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err()
                {
                    debug!("Departure date '{}' is not a calendar date, passing through", date);
                }
                self.selection.set_departure_date(date);
            }
            Action::SelectDestinationCountry(code) => self.selection.set_destination_country(code),
            Action::SelectDestinationAirport(Some(airport)) => {
                self.check_airport(
                    self.selection.destination_country(),
                    &airport.code,
                    Some(airport.city.as_str()),
                )?;
                self.selection.set_destination_airport(airport);
            }
            Action::SelectDestinationAirport(None) => self.selection.clear_destination_airport(),
        }

        Ok(self.refresh_gate())
    }

    fn check_airport(&self, country: &str, code: &str, city: Option<&str>) -> Result<()> {
        if code.is_empty() {
            return Ok(());
        }
        if country.is_empty() {
            return Err(TravelPlannerError::validation(format!(
                "Select a country before choosing airport '{code}'"
            )));
        }

        match self.reference.find_airport(country, code) {
            Some(airport) if city.is_none_or(|city| city == airport.city) => Ok(()),
            Some(airport) => Err(TravelPlannerError::validation(format!(
                "Airport '{code}' serves {}, not {}",
                airport.city,
                city.unwrap_or_default()
            ))),
            None => Err(TravelPlannerError::validation(format!(
                "Airport '{code}' is not in country '{country}'"
            ))),
        }
    }

    fn refresh_gate(&mut self) -> Option<FetchTicket> {
        let gating = self.selection.gating_fields();
        if gating == self.gating {
            return None;
        }

        self.gating = gating;
        self.generation += 1;

        match self.gating.to_request() {
            Some(request) => {
                info!(
                    "Gate satisfied, starting fetch cycle {} for {} -> {} on {}",
                    self.generation,
                    request.origin_airport,
                    request.destination_airport,
                    request.departure_date
                );
                self.status = FetchStatus::Loading;
                Some(FetchTicket {
                    generation: self.generation,
                    request,
                })
            }
            None => {
                if self.status.is_loading() {
                    debug!("Gate closed while loading, cycle {} abandoned", self.generation - 1);
                    self.status = FetchStatus::Idle;
                }
                None
            }
        }
    }

    /// Apply the outcome of a fetch cycle.
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: Result<DisplayModel>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding result of cycle {} (current is {})",
                ticket.generation, self.generation
            );
            return false;
        }

        match outcome {
            Ok(display) => {
                self.display = display;
                self.status = FetchStatus::Done;
                self.last_error = None;
            }
            Err(e) => {
                error!("Error fetching flight and weather data: {}", e);
                self.status = FetchStatus::Failed { kind: e.kind() };
                self.last_error = Some(e.user_message());
            }
        }
        true
    }

    /// Dispatch an action and, if it starts a cycle, run it to completion
    pub async fn dispatch_and_fetch(
        &mut self,
        action: Action,
        orchestrator: &FetchOrchestrator,
    ) -> Result<()> {
        if let Some(ticket) = self.dispatch(action)? {
            let outcome = orchestrator.execute(ticket.request()).await;
            self.complete(&ticket, outcome);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Service};
    use crate::models::{FlightLeg, WeatherSummary};

    fn planner() -> Planner {
        Planner::new(Arc::new(ReferenceData::embedded().unwrap()))
    }

    fn paris() -> AirportRef {
        AirportRef {
            code: "CDG".to_string(),
            city: "Paris".to_string(),
        }
    }

    fn weather(city: &str) -> WeatherSummary {
        WeatherSummary {
            location_name: city.to_string(),
            country: "France".to_string(),
            localtime: "2025-06-01 14:05".to_string(),
            temperature_c: 21.0,
            icon_url: String::new(),
            description: "Sunny".to_string(),
            humidity_pct: 48.0,
            wind_kmh: 13.0,
            visibility_km: 10.0,
            feels_like_c: 22.0,
        }
    }

    /// Drive the form up to the last missing field and return its ticket
    fn fill_form(planner: &mut Planner) -> FetchTicket {
        assert!(planner.dispatch(Action::SelectOriginCountry("US".into())).unwrap().is_none());
        assert!(planner.dispatch(Action::SelectOriginAirport("JFK".into())).unwrap().is_none());
        assert!(planner.dispatch(Action::SelectDepartureDate("2025-06-01".into())).unwrap().is_none());
        assert!(planner.dispatch(Action::SelectDestinationCountry("FR".into())).unwrap().is_none());
        planner
            .dispatch(Action::SelectDestinationAirport(Some(paris())))
            .unwrap()
            .expect("complete form starts a cycle")
    }

    #[test]
    fn test_gate_opens_exactly_once() {
        let mut planner = planner();
        let ticket = fill_form(&mut planner);

        assert_eq!(planner.status(), FetchStatus::Loading);
        assert_eq!(ticket.request().origin_airport, "JFK");
        assert_eq!(ticket.request().destination_city, "Paris");

        // same value again is not a change
        let again = planner.dispatch(Action::SelectDestinationAirport(Some(paris()))).unwrap();
        assert!(again.is_none());
        assert_eq!(planner.generation(), ticket.generation());
    }

    #[test]
    fn test_partial_input_leaves_status_and_display_alone() {
        let mut planner = planner();
        let ticket = fill_form(&mut planner);
        let display = DisplayModel::new(vec![FlightLeg::new("08:00", "20:00")], weather("Paris"));
        assert!(planner.complete(&ticket, Ok(display.clone())));

        let next = planner.dispatch(Action::SelectDestinationCountry("DE".into())).unwrap();
        assert!(next.is_none());
        assert_eq!(planner.status(), FetchStatus::Done);
        assert_eq!(planner.display(), &display);
        assert_eq!(planner.selection().destination_city(), "");
    }

    #[test]
    fn test_retrigger_after_failure() {
        let mut planner = planner();
        let ticket = fill_form(&mut planner);
        planner.complete(&ticket, Err(TravelPlannerError::timeout(Service::Weather)));
        assert_eq!(
            planner.status(),
            FetchStatus::Failed {
                kind: ErrorKind::Timeout
            }
        );
        assert!(planner.snapshot().last_error.unwrap().contains("did not answer"));

        let retry = planner
            .dispatch(Action::SelectDepartureDate("2025-06-02".into()))
            .unwrap()
            .unwrap();
        assert_eq!(retry.request().departure_date, "2025-06-02");
        assert_eq!(planner.status(), FetchStatus::Loading);
    }

    #[test]
    fn test_failure_keeps_previous_display() {
        let mut planner = planner();
        let first = fill_form(&mut planner);
        let display = DisplayModel::new(vec![FlightLeg::new("08:00", "20:00")], weather("Paris"));
        planner.complete(&first, Ok(display.clone()));

        let second = planner
            .dispatch(Action::SelectDepartureDate("2025-06-03".into()))
            .unwrap()
            .unwrap();
        planner.complete(&second, Err(TravelPlannerError::http(Service::Weather, 503, "down")));

        assert_eq!(planner.display(), &display);
        assert!(matches!(planner.status(), FetchStatus::Failed { kind: ErrorKind::Http }));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut planner = planner();
        let older = fill_form(&mut planner);
        let newer = planner
            .dispatch(Action::SelectDepartureDate("2025-06-02".into()))
            .unwrap()
            .unwrap();

        let newer_display = DisplayModel::new(vec![FlightLeg::new("10:00", "22:00")], weather("Paris"));
        assert!(planner.complete(&newer, Ok(newer_display.clone())));

        let older_display = DisplayModel::new(vec![FlightLeg::new("06:00", "18:00")], weather("Paris"));
        assert!(!planner.complete(&older, Ok(older_display)));
        assert_eq!(planner.display(), &newer_display);
        assert_eq!(planner.status(), FetchStatus::Done);
    }

    #[test]
    fn test_closing_gate_mid_flight_abandons_cycle() {
        let mut planner = planner();
        let ticket = fill_form(&mut planner);
        planner.dispatch(Action::SelectOriginCountry("GB".into())).unwrap();

        assert_eq!(planner.status(), FetchStatus::Idle);
        assert!(!planner.complete(&ticket, Ok(DisplayModel::default())));
        assert_eq!(planner.selection().origin_airport(), "");
    }

    #[test]
    fn test_airport_must_belong_to_country() {
        let mut planner = planner();
        planner.dispatch(Action::SelectOriginCountry("US".into())).unwrap();
        let err = planner.dispatch(Action::SelectOriginAirport("CDG".into())).unwrap_err();
        assert!(err.to_string().contains("not in country 'US'"));
        assert_eq!(planner.selection().origin_airport(), "");

        let err = planner
            .dispatch(Action::SelectDestinationAirport(Some(paris())))
            .unwrap_err();
        assert!(err.to_string().contains("Select a country"));
    }

    #[test]
    fn test_destination_city_must_match_airport() {
        let mut planner = planner();
        planner.dispatch(Action::SelectDestinationCountry("FR".into())).unwrap();
        let err = planner
            .dispatch(Action::SelectDestinationAirport(Some(AirportRef {
                code: "CDG".to_string(),
                city: "Nice".to_string(),
            })))
            .unwrap_err();
        assert!(err.to_string().contains("serves Paris"));
    }

    #[test]
    fn test_airport_lists_follow_country() {
        let mut planner = planner();
        assert!(planner.origin_airports().is_empty());
        planner.dispatch(Action::SelectOriginCountry("MC".into())).unwrap();
        assert!(planner.origin_airports().is_empty());
        planner.dispatch(Action::SelectDestinationCountry("FR".into())).unwrap();
        assert_eq!(planner.destination_airports().len(), 3);
    }

    #[test]
    fn test_action_json_shape() {
        let json = serde_json::to_string(&Action::SelectOriginAirport("JFK".into())).unwrap();
        assert_eq!(json, r#"{"action":"select_origin_airport","value":"JFK"}"#);
    }
}

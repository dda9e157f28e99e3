//! Text rendering of the planner form and its result panels
//!
//! Views are derived from a [`PlannerSnapshot`] and the reference table only;
//! nothing here mutates planner state.

use serde::Serialize;
use std::fmt::{self, Display};

use crate::error::ErrorKind;
use crate::models::{Airport, Country, FetchStatus, FlightLeg, WeatherSummary};
use crate::planner::PlannerSnapshot;
use crate::reference::ReferenceData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&Country> for SelectOption {
    fn from(country: &Country) -> Self {
        Self {
            value: country.code.clone(),
            label: country.name.clone(),
        }
    }
}

impl From<&Airport> for SelectOption {
    fn from(airport: &Airport) -> Self {
        Self {
            value: airport.code.clone(),
            label: airport.label(),
        }
    }
}

/// One scheduled flight as shown on a result card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightCard {
    pub origin: String,
    pub departure_time: String,
    /// Elapsed time, or `unknown duration` for unreadable clock times
    pub duration: String,
    pub destination: String,
    pub arrival_time: String,
}

impl FlightCard {
    pub fn new(origin: &str, destination: &str, leg: &FlightLeg) -> Self {
        Self {
            origin: origin.to_string(),
            departure_time: leg.departure_time.clone(),
            duration: leg
                .elapsed()
                .unwrap_or_else(|_| "unknown duration".to_string()),
            destination: destination.to_string(),
            arrival_time: leg.arrival_time.clone(),
        }
    }
}

impl Display for FlightCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✈️ {} {}", self.origin, self.departure_time)?;
        writeln!(f, "   ⏱️ {}", self.duration)?;
        writeln!(f, "   🛬 {} {}", self.destination, self.arrival_time)
    }
}

/// Flight results panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", content = "cards", rename_all = "snake_case")]
pub enum FlightPanel {
    Hidden,
    Loading,
    NoFlights,
    Cards(Vec<FlightCard>),
}

/// Weather panel for the destination city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherCard {
    pub location: String,
    pub country: String,
    /// Short month and two-digit year
    pub month: String,
    pub icon_url: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
}

impl From<&WeatherSummary> for WeatherCard {
    fn from(weather: &WeatherSummary) -> Self {
        Self {
            location: weather.location_name.clone(),
            country: weather.country.clone(),
            month: weather.format_local_month(),
            icon_url: weather.icon_url.clone(),
            temperature: weather.format_temperature(),
            description: weather.description.clone(),
            feels_like: weather.format_feels_like(),
            humidity: weather.format_humidity(),
            wind: weather.format_wind(),
            visibility: weather.format_visibility(),
        }
    }
}

impl Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🌤️ Weather in {}, {} ({})", self.location, self.country, self.month)?;
        if self.description.is_empty() {
            writeln!(f, "   🌡️ {}", self.temperature)?;
        } else {
            writeln!(f, "   🌡️ {} - {}", self.temperature, self.description)?;
        }
        writeln!(f, "   Feels Like: {}", self.feels_like)?;
        writeln!(f, "   Humidity: {}", self.humidity)?;
        writeln!(f, "   Wind Speed: {}", self.wind)?;
        writeln!(f, "   Visibility: {}", self.visibility)?;
        if !self.icon_url.is_empty() {
            writeln!(f, "   Icon: {}", self.icon_url)?;
        }
        Ok(())
    }
}

/// The whole form: selectors, date input and result panels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub countries: Vec<SelectOption>,
    /// `None` when the selector is hidden
    pub origin_airports: Option<Vec<SelectOption>>,
    pub destination_airports: Option<Vec<SelectOption>>,
    pub date_enabled: bool,
    pub flights: FlightPanel,
    pub weather: Option<WeatherCard>,
    /// Actionable text for a failed cycle
    pub notice: Option<String>,
}

impl FormView {
    pub fn new(reference: &ReferenceData, snapshot: &PlannerSnapshot) -> Self {
        let selection = &snapshot.selection;
        let loading = snapshot.status.is_loading();

        let flights = if loading {
            FlightPanel::Loading
        } else if selection.origin_airport().is_empty()
            || selection.destination_airport().is_empty()
            || snapshot.display.is_empty()
        {
            FlightPanel::Hidden
        } else if snapshot.display.flights.is_empty() {
            FlightPanel::NoFlights
        } else {
            FlightPanel::Cards(
                snapshot
                    .display
                    .flights
                    .iter()
                    .map(|leg| {
                        FlightCard::new(
                            selection.origin_airport(),
                            selection.destination_airport(),
                            leg,
                        )
                    })
                    .collect(),
            )
        };

        let weather = if loading {
            None
        } else {
            snapshot.display.weather.as_ref().map(WeatherCard::from)
        };

        let notice = match snapshot.status {
            FetchStatus::Failed { kind } => Some(
                snapshot
                    .last_error
                    .clone()
                    .unwrap_or_else(|| failure_notice(kind).to_string()),
            ),
            _ => None,
        };

        Self {
            countries: reference.countries().iter().map(SelectOption::from).collect(),
            origin_airports: airport_options(reference.airports_of(selection.origin_country())),
            destination_airports: airport_options(
                reference.airports_of(selection.destination_country()),
            ),
            date_enabled: !selection.origin_airport().is_empty(),
            flights,
            weather,
            notice,
        }
    }
}

fn airport_options(airports: &[Airport]) -> Option<Vec<SelectOption>> {
    if airports.is_empty() {
        None
    } else {
        Some(airports.iter().map(SelectOption::from).collect())
    }
}

/// Fallback text when a failed snapshot carries no message
pub fn failure_notice(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Transport => "Could not reach a lookup service. Check your connection and try again.",
        ErrorKind::Timeout => "A lookup took too long. Change a field to try again.",
        ErrorKind::Http => "A lookup service refused the request. Check your API keys.",
        ErrorKind::Parse => "A lookup service returned unreadable data.",
        ErrorKind::Config => "Configuration error. Check your config file and API keys.",
        _ => "Something went wrong while fetching flights and weather.",
    }
}

impl Display for FlightPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightPanel::Hidden => Ok(()),
            FlightPanel::Loading => writeln!(f, "⏳ Loading flights and weather..."),
            FlightPanel::NoFlights => writeln!(f, "No flights found"),
            FlightPanel::Cards(cards) => {
                writeln!(f, "Flights")?;
                for card in cards {
                    write!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "⚠️ {notice}")?;
        }
        write!(f, "{}", self.flights)?;
        if let Some(weather) = &self.weather {
            write!(f, "{weather}")?;
        }
        Ok(())
    }
}

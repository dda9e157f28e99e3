//! travel-planner - flights and destination weather from the terminal
//!
//! Usage examples
//! --------------
//!
//! - List countries, then the airports of one
//!   $ travel-planner countries
//!   $ travel-planner airports FR
//!
//! - Plan a trip (needs AVIATION_STACK_API_KEY and WEATHER_STACK_API_KEY)
//!   $ travel-planner plan --origin-country US --origin JFK --date 2025-06-01 \
//!       --destination-country FR --destination CDG
//!
//! - Clock-time arithmetic
//!   $ travel-planner duration 09:00 11:30
//!   $ travel-planner duration 23:10 05:40 --elapsed
mod args;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use crate::args::{CliArgs, Commands};
use travel_planner::models::Airport;
use travel_planner::{
    Action, FetchOrchestrator, FetchStatus, FormView, Planner, PlannerSession, ReferenceData,
    TravelPlannerConfig, TravelPlannerError, elapsed_duration, logging, time_difference,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    let config = TravelPlannerConfig::load_from_path(args.config.clone())?;
    logging::init(&config.logging, args.verbose)?;

    let reference = match args.data.clone().or_else(|| config.reference.path.clone()) {
        Some(path) => ReferenceData::from_path(&path)
            .with_context(|| format!("Failed to load reference data from {}", path.display()))?,
        None => ReferenceData::embedded()?,
    };

    match args.command {
        Commands::Countries => {
            for country in reference.countries() {
                println!("{}  {}", country.code, country.name);
            }
        }

        Commands::Airports { country } => {
            let airports = reference.airports_of(&country);
            if airports.is_empty() {
                println!("No airports for {country}; the airport selector is hidden.");
            } else {
                for airport in airports {
                    println!("{}", airport.label());
                }
            }
        }

        Commands::Plan {
            origin_country,
            origin,
            date,
            destination_country,
            destination,
            json,
        } => {
            return plan(
                &config,
                reference,
                PlanInput {
                    origin_country,
                    origin,
                    date,
                    destination_country,
                    destination,
                },
                json,
            )
            .await;
        }

        Commands::Duration {
            start,
            end,
            elapsed,
        } => {
            let duration = if elapsed {
                elapsed_duration(&start, &end)?
            } else {
                time_difference(&start, &end)?
            };
            println!("{duration}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

struct PlanInput {
    origin_country: String,
    origin: String,
    date: String,
    destination_country: String,
    destination: String,
}

async fn plan(
    config: &TravelPlannerConfig,
    reference: ReferenceData,
    input: PlanInput,
    json: bool,
) -> Result<ExitCode> {
    let orchestrator = FetchOrchestrator::from_config(config)?;

    reference.require_country(&input.origin_country)?;
    reference.require_country(&input.destination_country)?;
    let destination = reference
        .find_airport(&input.destination_country, &input.destination)
        .map(Airport::to_ref)
        .ok_or_else(|| TravelPlannerError::reference_miss(input.destination.clone()))?;

    if NaiveDate::parse_from_str(&input.date, "%Y-%m-%d").is_err() {
        warn!(
            "Departure date '{}' is not YYYY-MM-DD, sending it as given",
            input.date
        );
    }

    let reference = Arc::new(reference);
    let session = PlannerSession::spawn(Planner::new(reference.clone()), orchestrator);

    // same order a user fills in the form
    let actions = [
        Action::SelectOriginCountry(input.origin_country),
        Action::SelectOriginAirport(input.origin),
        Action::SelectDepartureDate(input.date),
        Action::SelectDestinationCountry(input.destination_country),
        Action::SelectDestinationAirport(Some(destination)),
    ];
    for action in actions {
        session.dispatch(action).await?;
    }

    let snapshot = session.settled().await?;
    session.shutdown().await?;
    info!("Planner settled with status {:?}", snapshot.status);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", FormView::new(&reference, &snapshot));
    }

    Ok(match snapshot.status {
        FetchStatus::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for travel-planner
#[derive(Debug, Parser)]
#[command(
    name = "travel-planner",
    version,
    about = "Flight timings and destination weather for a planned trip"
)]
pub struct CliArgs {
    /// Path to a TOML config file (default: <config dir>/travel-planner/config.toml)
    #[arg(short = 'c', long = "config", global = true, env = "TRAVEL_PLANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to a replacement countries/airports JSON file
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// Enable debug logging for this crate
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all countries
    Countries,

    /// List the airports of a country
    Airports {
        /// Country code (e.g. US, FR)
        country: String,
    },

    /// Fill the form and fetch flights and weather for the trip
    Plan {
        /// Origin country code
        #[arg(long)]
        origin_country: String,

        /// Origin airport code (e.g. JFK)
        #[arg(long)]
        origin: String,

        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Destination country code
        #[arg(long)]
        destination_country: String,

        /// Destination airport code (e.g. CDG)
        #[arg(long)]
        destination: String,

        /// Print the planner snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Time between two HH:MM clock times
    Duration {
        start: String,
        end: String,

        /// Roll over midnight when END is earlier than START
        #[arg(long)]
        elapsed: bool,
    },
}

//! Clock-time arithmetic for flight cards
//!
//! Schedule lookups only return wall-clock `HH:MM` strings without a date,
//! so durations are computed on minutes since midnight.

use chrono::{NaiveTime, Timelike};

use crate::{Result, TravelPlannerError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse an `HH:MM` clock time into minutes since midnight
pub fn parse_clock(time: &str) -> Result<u32> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| {
        TravelPlannerError::validation(format!("'{time}' is not an HH:MM time ({e})"))
    })?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Absolute difference between two clock times.
///
/// Symmetric in its arguments and unaware of midnight: `23:00` to `01:00`
/// yields 22 hours. Use [`elapsed_duration`] for overnight legs.
pub fn time_difference(start: &str, end: &str) -> Result<String> {
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    Ok(format_minutes(start.abs_diff(end)))
}

/// Forward duration from departure to arrival, rolling over midnight when
/// the arrival clock time is earlier than the departure.
pub fn elapsed_duration(departure: &str, arrival: &str) -> Result<String> {
    let departure = parse_clock(departure)?;
    let arrival = parse_clock(arrival)?;
    let minutes = (arrival + MINUTES_PER_DAY - departure) % MINUTES_PER_DAY;
    Ok(format_minutes(minutes))
}

fn format_minutes(minutes: u32) -> String {
    format!("{} hours and {} minutes", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:00", "11:30", "2 hours and 30 minutes")]
    #[case("11:30", "09:00", "2 hours and 30 minutes")]
    #[case("07:15", "07:15", "0 hours and 0 minutes")]
    #[case("00:00", "23:59", "23 hours and 59 minutes")]
    #[case("23:00", "01:00", "22 hours and 0 minutes")]
    fn test_time_difference(#[case] start: &str, #[case] end: &str, #[case] expected: &str) {
        assert_eq!(time_difference(start, end).unwrap(), expected);
    }

    #[rstest]
    #[case("09:00", "11:30", "2 hours and 30 minutes")]
    #[case("23:00", "01:00", "2 hours and 0 minutes")]
    #[case("22:45", "06:10", "7 hours and 25 minutes")]
    #[case("12:00", "12:00", "0 hours and 0 minutes")]
    fn test_elapsed_duration(#[case] departure: &str, #[case] arrival: &str, #[case] expected: &str) {
        assert_eq!(elapsed_duration(departure, arrival).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("noon")]
    #[case("25:00")]
    #[case("12:75")]
    fn test_malformed_times_are_rejected(#[case] input: &str) {
        let err = time_difference(input, "10:00").unwrap_err();
        assert!(matches!(err, TravelPlannerError::Validation { .. }));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("13:05").unwrap(), 785);
        assert_eq!(parse_clock(" 07:30 ").unwrap(), 450);
    }
}

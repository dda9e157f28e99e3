//! Error types and handling for the travel planner

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Remote collaborator a fetch error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    FlightSchedule,
    Weather,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::FlightSchedule => write!(f, "flight schedule"),
            Service::Weather => write!(f, "weather"),
        }
    }
}

/// Coarse error classification, carried by a failed fetch status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ReferenceDataMiss,
    Transport,
    Timeout,
    Http,
    Parse,
    Config,
    Validation,
    Session,
    Io,
}

/// Main error type for the travel planner
#[derive(Error, Debug)]
pub enum TravelPlannerError {
    /// Unknown country or airport code in the reference table
    #[error("Unknown reference code: {code}")]
    ReferenceDataMiss { code: String },

    /// Network unreachable, connection reset, TLS failure...
    #[error("{service} request failed: {message}")]
    Transport { service: Service, message: String },

    /// Request or fetch cycle exceeded its deadline
    #[error("{service} request timed out")]
    Timeout { service: Service },

    /// Non-success status or an error envelope in the body
    #[error("{service} API returned {status}: {message}")]
    Http {
        service: Service,
        status: u16,
        message: String,
    },

    /// Malformed JSON or missing expected fields
    #[error("Invalid {service} response: {message}")]
    Parse { service: Service, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Planner session task has stopped
    #[error("Planner session closed: {message}")]
    Session { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelPlannerError {
    pub fn reference_miss<S: Into<String>>(code: S) -> Self {
        Self::ReferenceDataMiss { code: code.into() }
    }

    pub fn transport<S: Into<String>>(service: Service, message: S) -> Self {
        Self::Transport {
            service,
            message: message.into(),
        }
    }

    pub fn timeout(service: Service) -> Self {
        Self::Timeout { service }
    }

    pub fn http<S: Into<String>>(service: Service, status: u16, message: S) -> Self {
        Self::Http {
            service,
            status,
            message: message.into(),
        }
    }

    pub fn parse<S: Into<String>>(service: Service, message: S) -> Self {
        Self::Parse {
            service,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TravelPlannerError::ReferenceDataMiss { .. } => ErrorKind::ReferenceDataMiss,
            TravelPlannerError::Transport { .. } => ErrorKind::Transport,
            TravelPlannerError::Timeout { .. } => ErrorKind::Timeout,
            TravelPlannerError::Http { .. } => ErrorKind::Http,
            TravelPlannerError::Parse { .. } => ErrorKind::Parse,
            TravelPlannerError::Config { .. } => ErrorKind::Config,
            TravelPlannerError::Validation { .. } => ErrorKind::Validation,
            TravelPlannerError::Session { .. } => ErrorKind::Session,
            TravelPlannerError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Service the error came from, if it was a remote call
    #[must_use]
    pub fn service(&self) -> Option<Service> {
        match self {
            TravelPlannerError::Transport { service, .. }
            | TravelPlannerError::Timeout { service }
            | TravelPlannerError::Http { service, .. }
            | TravelPlannerError::Parse { service, .. } => Some(*service),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelPlannerError::ReferenceDataMiss { code } => {
                format!("'{code}' is not a known country or airport code.")
            }
            TravelPlannerError::Transport { service, .. } => format!(
                "Unable to reach the {service} service. Please check your internet connection."
            ),
            TravelPlannerError::Timeout { service } => {
                format!("The {service} service did not answer in time. Please try again.")
            }
            TravelPlannerError::Http { service, status, .. } if *status == 401 => {
                format!("The {service} API rejected the access key. Please check your API keys.")
            }
            TravelPlannerError::Http { service, .. } => {
                format!("The {service} service is currently unavailable.")
            }
            TravelPlannerError::Parse { service, .. } => {
                format!("The {service} service returned data that could not be read.")
            }
            TravelPlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TravelPlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelPlannerError::Session { .. } => {
                "The planner stopped unexpectedly. Please try again.".to_string()
            }
            TravelPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelPlannerError::config("missing API key");
        assert!(matches!(config_err, TravelPlannerError::Config { .. }));

        let http_err = TravelPlannerError::http(Service::Weather, 503, "down");
        assert_eq!(http_err.kind(), ErrorKind::Http);
        assert_eq!(http_err.service(), Some(Service::Weather));

        let miss = TravelPlannerError::reference_miss("XX");
        assert_eq!(miss.kind(), ErrorKind::ReferenceDataMiss);
        assert_eq!(miss.service(), None);
    }

    #[test]
    fn test_user_messages() {
        let transport = TravelPlannerError::transport(Service::FlightSchedule, "dns");
        assert!(transport.user_message().contains("Unable to reach the flight schedule"));

        let unauthorized = TravelPlannerError::http(Service::Weather, 401, "invalid_access_key");
        assert!(unauthorized.user_message().contains("access key"));

        let timeout = TravelPlannerError::timeout(Service::Weather);
        assert!(timeout.user_message().contains("did not answer in time"));

        let validation_err = TravelPlannerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_display_mentions_service() {
        let err = TravelPlannerError::parse(Service::FlightSchedule, "missing field `arrival`");
        assert_eq!(
            err.to_string(),
            "Invalid flight schedule response: missing field `arrival`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TravelPlannerError = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

//! Error types and handling for the `TripWeaver` application

use thiserror::Error;

/// Main error type for the `TripWeaver` application
#[derive(Error, Debug)]
pub enum TripWeaverError {
    /// Neither geocoding service produced a coordinate for the query
    #[error("Address not found: {query}")]
    AddressNotFound { query: String },

    /// Imagery lookup failed; callers degrade to "no image"
    #[error("Imagery unavailable: {message}")]
    ImageryUnavailable { message: String },

    /// Itinerary-generation output was not valid against the expected schema
    #[error("Generation parse error: {message}")]
    GenerationParse { message: String },

    /// Network or remote-service communication errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripWeaverError {
    /// Create a new address-not-found error
    pub fn address_not_found<S: Into<String>>(query: S) -> Self {
        Self::AddressNotFound {
            query: query.into(),
        }
    }

    /// Create a new imagery-unavailable error
    pub fn imagery<S: Into<String>>(message: S) -> Self {
        Self::ImageryUnavailable {
            message: message.into(),
        }
    }

    /// Create a new generation-parse error
    pub fn generation_parse<S: Into<String>>(message: S) -> Self {
        Self::GenerationParse {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
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

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripWeaverError::AddressNotFound { query } => {
                format!("Could not find a location for '{query}'. Please check the address.")
            }
            TripWeaverError::ImageryUnavailable { .. } => {
                "No imagery is available for this place.".to_string()
            }
            TripWeaverError::GenerationParse { .. } => {
                "The itinerary generator returned an unusable response. Please try again."
                    .to_string()
            }
            TripWeaverError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripWeaverError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripWeaverError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripWeaverError::Io { .. } => {
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
        let not_found = TripWeaverError::address_not_found("Atlantis");
        assert!(matches!(not_found, TripWeaverError::AddressNotFound { .. }));

        let parse_err = TripWeaverError::generation_parse("expected object");
        assert!(matches!(parse_err, TripWeaverError::GenerationParse { .. }));

        let validation_err = TripWeaverError::validation("empty address");
        assert!(matches!(validation_err, TripWeaverError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let not_found = TripWeaverError::address_not_found("Atlantis");
        assert!(not_found.user_message().contains("Atlantis"));

        let network_err = TripWeaverError::network("test");
        assert!(network_err.user_message().contains("Unable to connect"));

        let validation_err = TripWeaverError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let trip_err: TripWeaverError = io_err.into();
        assert!(matches!(trip_err, TripWeaverError::Io { .. }));
    }
}

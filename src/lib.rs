//! `TripWeaver` - AI-assisted trip itinerary planning
//!
//! This library provides the core functionality for itinerary generation,
//! place geocoding with fallback, greedy day-route ordering, and itinerary
//! assembly for rendering.

pub mod assembler;
pub mod config;
pub mod error;
pub mod generation;
pub mod geocode;
pub mod links;
pub mod models;
pub mod places;
pub mod resolver;
pub mod routing;

// Re-export core types for public API
pub use assembler::ItineraryAssembler;
pub use config::TripWeaverConfig;
pub use error::TripWeaverError;
pub use generation::{GeneratedDay, GeneratedItinerary, GenerationClient, parse_generation};
pub use geocode::{GeocodeService, Geocoder, NominatimClient};
pub use models::{Coordinate, DayPlan, Itinerary, Place, PlaceSeed};
pub use places::{GooglePlacesClient, ImageryService};
pub use resolver::PlaceResolver;
pub use routing::{Route, plan_route};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripWeaverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

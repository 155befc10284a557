//! Data models for the TripWeaver application
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: Validated geographic positions and distances
//! - Place: Generated place seeds and resolved points of interest
//! - Itinerary: Per-day plans and the assembled itinerary

pub mod coordinate;
pub mod itinerary;
pub mod place;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use itinerary::{DayPlan, Itinerary};
pub use place::{Place, PlaceSeed};

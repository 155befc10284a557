//! Coordinate model for geographic positions

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

use crate::TripWeaverError;

/// A latitude/longitude pair in decimal degrees.
///
/// Constructed through [`Coordinate::new`], which enforces the valid
/// latitude/longitude ranges; immutable afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate, validating the degree ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TripWeaverError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TripWeaverError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TripWeaverError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to another coordinate, in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude: other.latitude,
            longitude: other.longitude,
        };
        distance(from, to, Units::Kilometers)
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_coordinate() {
        let coord = Coordinate::new(46.8182, 8.2275).unwrap();
        assert_eq!(coord.latitude, 46.8182);
        assert_eq!(coord.longitude, 8.2275);
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 181.0)]
    #[case(0.0, -181.0)]
    fn test_out_of_range_rejected(#[case] lat: f64, #[case] lon: f64) {
        let result = Coordinate::new(lat, lon);
        assert!(matches!(
            result,
            Err(TripWeaverError::Validation { .. })
        ));
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_distance_km() {
        // New York City to Los Angeles, roughly 3940 km great-circle
        let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
        let la = Coordinate::new(34.0522, -118.2437).unwrap();

        let dist = nyc.distance_km(&la);
        assert!((3800.0..4100.0).contains(&dist), "got {dist}");

        // Symmetry and identity
        assert!((dist - la.distance_km(&nyc)).abs() < 1e-9);
        assert!(nyc.distance_km(&nyc) < 1e-9);
    }

    #[test]
    fn test_format_coordinates() {
        let coord = Coordinate::new(46.8182, 8.2275).unwrap();
        assert_eq!(coord.format_coordinates(), "46.8182, 8.2275");
    }
}

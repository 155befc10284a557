//! Place models: generated seeds and resolved points of interest

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A point of interest as produced by the itinerary generator,
/// before any geocoding has happened.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSeed {
    /// Place name as suggested by the generator
    pub name: String,
    /// Short description of the place
    pub description: String,
}

impl PlaceSeed {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A resolved point of interest.
///
/// `coordinate: None` means both geocoding services failed for this place;
/// the place is still kept for display. `image_url` is best-effort and
/// independent of the coordinate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    /// Place name
    pub name: String,
    /// Short description
    pub description: String,
    /// Resolved coordinate, or `None` when the location is unavailable
    pub coordinate: Option<Coordinate>,
    /// Static imagery URL, or `None` when no image could be resolved
    pub image_url: Option<String>,
}

impl Place {
    /// Whether geocoding succeeded for this place
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_resolution_flag() {
        let unresolved = Place {
            name: "Lost City".to_string(),
            description: "Nowhere to be found".to_string(),
            coordinate: None,
            image_url: None,
        };
        assert!(!unresolved.is_resolved());

        let resolved = Place {
            coordinate: Some(Coordinate::new(48.8584, 2.2945).unwrap()),
            ..unresolved
        };
        assert!(resolved.is_resolved());
    }
}

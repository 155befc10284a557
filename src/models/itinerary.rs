//! Itinerary models: per-day plans and the assembled itinerary

use serde::{Deserialize, Serialize};

use super::Place;
use crate::routing::Route;

/// The places scheduled for one trip day.
///
/// `places` keeps the generator's order, which is the display order; the
/// attached `route` carries the visiting order and is derived data,
/// recomputed on every assembly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPlan {
    /// Day label from the generator, e.g. "Day 1"
    pub label: String,
    /// Places in display order
    pub places: Vec<Place>,
    /// Round-trip visiting order from the hotel over the resolved places
    pub route: Route,
}

impl DayPlan {
    /// Places that resolved to a coordinate
    pub fn resolved_places(&self) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(|p| p.is_resolved())
    }
}

/// The assembled itinerary for one planning request.
///
/// Day order matches the generation output; the itinerary owns its day
/// plans and places.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Itinerary {
    /// Day plans in trip order
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    #[test]
    fn test_resolved_places_filter() {
        let coord = Coordinate::new(40.7128, -74.0060).unwrap();
        let plan = DayPlan {
            label: "Day 1".to_string(),
            places: vec![
                Place {
                    name: "A".to_string(),
                    description: String::new(),
                    coordinate: Some(coord),
                    image_url: None,
                },
                Place {
                    name: "B".to_string(),
                    description: String::new(),
                    coordinate: None,
                    image_url: None,
                },
            ],
            route: Route::new(vec![coord, coord]),
        };

        let resolved: Vec<_> = plan.resolved_places().collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "A");
    }
}

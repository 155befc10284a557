//! Itinerary assembly
//!
//! Combines the generation output with place resolution and route planning
//! into the per-day structure handed to rendering code. Pure with respect
//! to any UI: a function of (generation result, location context, hotel).

use tracing::{instrument, warn};

use crate::generation::GeneratedItinerary;
use crate::models::{Coordinate, DayPlan, Itinerary};
use crate::resolver::PlaceResolver;
use crate::routing::plan_route;

/// Assembles generated day plans into a routed itinerary
pub struct ItineraryAssembler {
    resolver: PlaceResolver,
}

impl ItineraryAssembler {
    pub fn new(resolver: PlaceResolver) -> Self {
        Self { resolver }
    }

    /// Assemble an itinerary from validated generation output.
    ///
    /// Day order and within-day place order follow the generation output.
    /// Each day's route is planned over the successfully resolved
    /// coordinates only; unresolved places stay in the day plan for display.
    /// A day where nothing resolved keeps the degenerate hotel-only route
    /// rather than failing the itinerary.
    #[instrument(skip(self, generated), fields(days = generated.days.len()))]
    pub async fn assemble(
        &self,
        generated: &GeneratedItinerary,
        location_context: &str,
        hotel: Coordinate,
    ) -> Itinerary {
        let mut days = Vec::with_capacity(generated.days.len());

        for day in &generated.days {
            let places = self
                .resolver
                .resolve_all(location_context, &day.places)
                .await;

            let stops: Vec<Coordinate> = places.iter().filter_map(|p| p.coordinate).collect();
            let unresolved = places.len() - stops.len();
            if unresolved > 0 {
                warn!(
                    "{}: {} of {} places have no location and are excluded from routing",
                    day.label,
                    unresolved,
                    places.len()
                );
            }

            let route = plan_route(hotel, &stops);
            days.push(DayPlan {
                label: day.label.clone(),
                places,
                route,
            });
        }

        Itinerary { days }
    }
}

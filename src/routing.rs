//! Greedy nearest-neighbor route ordering for one trip day

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Coordinate;

/// An ordered visiting sequence for one day, starting and ending at the
/// same point (the hotel).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Coordinate>,
}

impl Route {
    #[must_use]
    pub fn new(waypoints: Vec<Coordinate>) -> Self {
        Self { waypoints }
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Total great-circle length of the route in kilometers
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance_km(&pair[1]))
            .sum()
    }
}

/// Order one day's stops into a round trip from `start`.
///
/// Greedy nearest-neighbor heuristic: repeatedly visit the unvisited stop
/// closest (great-circle) to the current position, then return to `start`.
/// Ties are broken by input order: the first stop encountered at the minimum
/// distance wins. The result is a reasonable tour, not the shortest one —
/// callers must not treat it as optimal.
///
/// The returned route always has `stops.len() + 2` waypoints, beginning and
/// ending at `start`; an empty stop set yields the degenerate
/// `[start, start]` cycle.
#[must_use]
pub fn plan_route(start: Coordinate, stops: &[Coordinate]) -> Route {
    let mut path = Vec::with_capacity(stops.len() + 2);
    path.push(start);

    let mut remaining: Vec<Coordinate> = stops.to_vec();
    while !remaining.is_empty() {
        let tail = path[path.len() - 1];

        // Strict less-than keeps the first stop on ties.
        let mut nearest = 0;
        let mut nearest_dist = tail.distance_km(&remaining[0]);
        for (i, stop) in remaining.iter().enumerate().skip(1) {
            let dist = tail.distance_km(stop);
            if dist < nearest_dist {
                nearest = i;
                nearest_dist = dist;
            }
        }

        path.push(remaining.remove(nearest));
    }

    path.push(start);
    let route = Route::new(path);

    debug!(
        "Planned route over {} stops, {:.1} km round trip",
        stops.len(),
        route.total_distance_km()
    );

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    // Midtown Manhattan hotel used across the routing tests
    fn hotel() -> Coordinate {
        coord(40.7551, -73.9934)
    }

    #[test]
    fn test_empty_stops_degenerate_cycle() {
        let route = plan_route(hotel(), &[]);
        assert_eq!(route.waypoints(), &[hotel(), hotel()]);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn test_single_stop() {
        let stop = coord(40.7484, -73.9857);
        let route = plan_route(hotel(), &[stop]);
        assert_eq!(route.waypoints(), &[hotel(), stop, hotel()]);
    }

    #[rstest]
    #[case(vec![coord(40.7484, -73.9857)])]
    #[case(vec![coord(40.7484, -73.9857), coord(40.7061, -73.9969)])]
    #[case(vec![
        coord(40.7484, -73.9857),
        coord(40.7061, -73.9969),
        coord(40.7829, -73.9654),
        coord(40.6892, -74.0445),
    ])]
    fn test_route_shape(#[case] stops: Vec<Coordinate>) {
        let route = plan_route(hotel(), &stops);
        let waypoints = route.waypoints();

        // |stops| + 2, closed at the hotel
        assert_eq!(waypoints.len(), stops.len() + 2);
        assert_eq!(waypoints[0], hotel());
        assert_eq!(waypoints[waypoints.len() - 1], hotel());

        // Every stop appears exactly once in between
        let mut visited: Vec<Coordinate> = waypoints[1..waypoints.len() - 1].to_vec();
        for stop in &stops {
            let pos = visited
                .iter()
                .position(|w| w == stop)
                .expect("stop missing from route");
            visited.remove(pos);
        }
        assert!(visited.is_empty());
    }

    #[test]
    fn test_greedy_picks_nearest_at_each_step() {
        let stops = vec![
            coord(40.6892, -74.0445), // Statue of Liberty, far
            coord(40.7484, -73.9857), // Empire State, near
            coord(40.7061, -73.9969), // Brooklyn Bridge, middle
        ];
        let route = plan_route(hotel(), &stops);
        let waypoints = route.waypoints();

        // At each step the chosen stop is no farther than any stop visited later
        for i in 1..waypoints.len() - 1 {
            let tail = waypoints[i - 1];
            let chosen = tail.distance_km(&waypoints[i]);
            for later in &waypoints[i + 1..waypoints.len() - 1] {
                assert!(
                    chosen <= tail.distance_km(later) + 1e-9,
                    "greedy invariant violated at step {i}"
                );
            }
        }

        // From midtown the Empire State Building is the nearest first hop
        assert_eq!(waypoints[1], stops[1]);
    }

    #[test]
    fn test_tie_break_first_input_order_wins() {
        let start = coord(0.0, 0.0);
        // Two stops equidistant from the start; the first one in input
        // order must be visited first.
        let east = coord(0.0, 1.0);
        let west = coord(0.0, -1.0);

        let route = plan_route(start, &[east, west]);
        assert_eq!(route.waypoints()[1], east);

        let route = plan_route(start, &[west, east]);
        assert_eq!(route.waypoints()[1], west);
    }

    #[test]
    fn test_total_distance_positive() {
        let stops = vec![coord(40.7484, -73.9857), coord(40.7061, -73.9969)];
        let route = plan_route(hotel(), &stops);
        assert!(route.total_distance_km() > 0.0);
    }
}

//! Navigation-link construction for rendered itineraries

use crate::models::DayPlan;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir";

/// Build the per-day directions URL: hotel, then each resolved place as
/// `name,context`, then the hotel again, all as percent-encoded path
/// segments. Places without a location are left out of the link.
#[must_use]
pub fn navigation_link(hotel_address: &str, location_context: &str, day: &DayPlan) -> String {
    let mut url = format!(
        "{}/{}/",
        DIRECTIONS_BASE_URL,
        urlencoding::encode(hotel_address)
    );

    for place in day.resolved_places() {
        url.push_str(&urlencoding::encode(&place.name));
        url.push(',');
        url.push_str(&urlencoding::encode(location_context));
        url.push('/');
    }

    url.push_str(&urlencoding::encode(hotel_address));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Place};
    use crate::routing::Route;

    fn place(name: &str, resolved: bool) -> Place {
        Place {
            name: name.to_string(),
            description: String::new(),
            coordinate: resolved.then(|| Coordinate::new(40.0, -74.0).unwrap()),
            image_url: None,
        }
    }

    fn day(places: Vec<Place>) -> DayPlan {
        DayPlan {
            label: "Day 1".to_string(),
            places,
            route: Route::new(vec![]),
        }
    }

    #[test]
    fn test_navigation_link_encodes_segments() {
        let day = day(vec![place("Central Park", true), place("The Met", true)]);
        let link = navigation_link("350 W 39th St", "New York City, USA", &day);

        assert_eq!(
            link,
            "https://www.google.com/maps/dir/350%20W%2039th%20St/\
             Central%20Park,New%20York%20City%2C%20USA/\
             The%20Met,New%20York%20City%2C%20USA/\
             350%20W%2039th%20St"
        );
    }

    #[test]
    fn test_navigation_link_skips_unresolved_places() {
        let day = day(vec![place("Central Park", true), place("Nowhere", false)]);
        let link = navigation_link("Hotel", "NYC", &day);

        assert!(link.contains("Central%20Park"));
        assert!(!link.contains("Nowhere"));
    }

    #[test]
    fn test_navigation_link_empty_day_round_trips_hotel() {
        let day = day(vec![]);
        let link = navigation_link("Hotel", "NYC", &day);
        assert_eq!(link, "https://www.google.com/maps/dir/Hotel/Hotel");
    }
}

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::Venue;
use crate::geo::{haversine_miles, GeoPoint};

/// Fills `distance_from_hotel` from coordinates where the backend left it out.
pub fn with_hotel_distances(mut venues: Vec<Venue>, hotel: GeoPoint) -> Vec<Venue> {
    for venue in venues.iter_mut().filter(|v| v.distance_from_hotel.is_none()) {
        match venue.coordinates.as_deref().map(GeoPoint::parse) {
            Some(Ok(point)) => venue.distance_from_hotel = Some(haversine_miles(hotel, point)),
            Some(Err(e)) => debug!(venue = venue.display_name(), error = %e, "Skipping venue distance"),
            None => {}
        }
    }
    venues
}

/// Name/address search plus an optional radius from the hotel.
pub fn filter_venues(venues: &[Venue], search: &str, max_distance: Option<f64>) -> Vec<Venue> {
    let needle = search.trim().to_lowercase();
    venues
        .iter()
        .filter(|v| {
            needle.is_empty()
                || v.display_name().to_lowercase().contains(&needle)
                || v.address.as_deref().unwrap_or_default().to_lowercase().contains(&needle)
        })
        .filter(|v| match (max_distance, v.distance_from_hotel) {
            (Some(max), Some(d)) => d <= max,
            _ => true,
        })
        .cloned()
        .collect()
}

/// Busiest venues first, then the most complete records, then the closest.
pub fn rank_venues(venues: &mut [Venue]) {
    venues.sort_by(|a, b| {
        b.upcoming_events_count
            .unwrap_or(0)
            .cmp(&a.upcoming_events_count.unwrap_or(0))
            .then_with(|| b.completeness_score().cmp(&a.completeness_score()))
            .then_with(|| match (a.distance_from_hotel, b.distance_from_hotel) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}

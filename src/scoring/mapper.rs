use tracing::debug;

use super::capacity::estimate_capacity;
use super::impact::{clamp_score, format_price_range, score_breakdown, ScoreBreakdown, PRICE_TBA};
use crate::domain::raw::DiscoveryResponse;
use crate::domain::{
    ApiEvent, ImageMetadata, ImpactLevel, InternalEvent, RawEvent, SelectedImage, TicketStatus, VenueTier,
    VenueType,
};
use crate::imaging::image_or_placeholder;

pub const DEFAULT_EVENT_NAME: &str = "Untitled Event";
pub const DEFAULT_VENUE_NAME: &str = "Venue TBA";
pub const DEFAULT_ADDRESS: &str = "Nashville, TN";
pub const DEFAULT_CATEGORY: &str = "General";
const ATTENDANCE_RATE: f64 = 0.85;

fn positive_capacity(capacity: Option<i64>) -> Option<u32> {
    capacity
        .filter(|c| *c > 0)
        .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
}

/// Raw capacity when present and positive, otherwise the name-based estimate.
pub fn resolve_capacity(capacity: Option<i64>, venue_name: Option<&str>) -> u32 {
    positive_capacity(capacity).unwrap_or_else(|| estimate_capacity(venue_name))
}

fn estimated_attendance(capacity: u32) -> u32 {
    (capacity as f64 * ATTENDANCE_RATE).round() as u32
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Score breakdown for a discovery-provider event.
pub fn explain_score(raw: &RawEvent) -> ScoreBreakdown {
    let venue = raw.venue();
    let capacity = resolve_capacity(
        venue.and_then(|v| v.capacity),
        venue.and_then(|v| v.name.as_deref()),
    );
    score_breakdown(raw.distance, raw.price_ranges(), capacity, raw.status_code())
}

/// Maps a discovery-provider event into a scored [`InternalEvent`].
///
/// Total: missing fields take defaults and nothing here fails.
pub fn map_event(raw: &RawEvent) -> InternalEvent {
    let venue = raw.venue();
    let venue_name_raw = venue.and_then(|v| non_blank(v.name.as_deref()));
    let venue_capacity = resolve_capacity(venue.and_then(|v| v.capacity), venue_name_raw);

    let breakdown = score_breakdown(raw.distance, raw.price_ranges(), venue_capacity, raw.status_code());
    let impact_score = breakdown.score();

    let name = non_blank(raw.name.as_deref()).unwrap_or(DEFAULT_EVENT_NAME).to_string();
    let venue_name = venue_name_raw.unwrap_or(DEFAULT_VENUE_NAME).to_string();
    let venue_type = VenueType::from_segment(raw.segment_name());

    let venue_address = venue
        .and_then(|v| {
            non_blank(v.address.as_ref().and_then(|a| a.line1.as_deref()))
                .or_else(|| non_blank(v.city.as_ref().and_then(|c| c.name.as_deref())))
        })
        .unwrap_or(DEFAULT_ADDRESS)
        .to_string();

    let image = image_or_placeholder(raw.images(), &name, venue_type.as_str());

    debug!(
        event = %name,
        score = impact_score,
        capacity = venue_capacity,
        "Mapped discovery event"
    );

    InternalEvent {
        id: raw.id.clone(),
        description: format!("{} at {}", name, venue_name),
        name,
        date: raw.local_date().map(str::to_string),
        time: raw.local_time().map(str::to_string),
        venue_name,
        venue_capacity,
        venue_type,
        venue_tier: VenueTier::from_capacity(venue_capacity),
        venue_address,
        impact_score,
        impact_level: ImpactLevel::from_score(impact_score),
        ticket_price_range: format_price_range(raw.price_ranges()),
        ticket_status: TicketStatus::from_status_code(raw.status_code()),
        distance_miles: raw.distance,
        estimated_attendance: estimated_attendance(venue_capacity),
        category: non_blank(raw.genre_name()).unwrap_or(DEFAULT_CATEGORY).to_string(),
        event_image: image.url,
        image_metadata: image.metadata,
        ticket_url: raw.url.clone(),
    }
}

/// Maps every event in a discovery search response; a missing list maps to nothing.
pub fn map_discovery_response(response: &DiscoveryResponse) -> Vec<InternalEvent> {
    response.events().iter().map(map_event).collect()
}

/// Maps a backend event. Backend scores are trusted but clamped; level and tier are re-derived.
pub fn map_api_event(api: &ApiEvent) -> InternalEvent {
    let name = non_blank(api.name.as_deref()).unwrap_or(DEFAULT_EVENT_NAME).to_string();
    let venue_name_raw = non_blank(api.venue.as_deref());
    let venue_capacity = resolve_capacity(api.venue_capacity, venue_name_raw);
    let venue_name = venue_name_raw.unwrap_or(DEFAULT_VENUE_NAME).to_string();

    // A zero or NaN backend score counts as unscored.
    let impact_score = api
        .impact_score
        .filter(|s| *s != 0.0 && !s.is_nan())
        .map(clamp_score)
        .unwrap_or(50);
    let venue_type = api
        .venue_type
        .as_deref()
        .and_then(|t| t.parse::<VenueType>().ok())
        .unwrap_or(VenueType::Other);
    let ticket_status = api
        .status
        .as_deref()
        .and_then(|s| s.parse::<TicketStatus>().ok())
        .unwrap_or(TicketStatus::Available);

    let image = match non_blank(api.event_image.as_deref()) {
        Some(url) => SelectedImage { url: url.to_string(), metadata: ImageMetadata::unknown() },
        None => image_or_placeholder(api.all_images.as_deref().unwrap_or(&[]), &name, venue_type.as_str()),
    };

    InternalEvent {
        id: api.id.clone(),
        description: non_blank(api.description.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} at {}", name, venue_name)),
        name,
        date: api.date.clone(),
        time: api.time.clone(),
        venue_name,
        venue_capacity,
        venue_type,
        venue_tier: VenueTier::from_capacity(venue_capacity),
        venue_address: non_blank(api.address.as_deref()).unwrap_or(DEFAULT_ADDRESS).to_string(),
        impact_score,
        impact_level: ImpactLevel::from_score(impact_score),
        ticket_price_range: non_blank(api.price.as_deref()).unwrap_or(PRICE_TBA).to_string(),
        ticket_status,
        distance_miles: api.distance,
        estimated_attendance: estimated_attendance(venue_capacity),
        category: non_blank(api.category.as_deref()).unwrap_or(DEFAULT_CATEGORY).to_string(),
        event_image: image.url,
        image_metadata: image.metadata,
        ticket_url: api.ticket_url.clone(),
    }
}

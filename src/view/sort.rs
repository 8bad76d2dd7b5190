use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::InternalEvent;
use crate::error::IntelError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Highest score first.
    ImpactScore,
    /// Soonest first.
    Date,
    /// Largest venue first.
    VenueCapacity,
    /// Closest first.
    Distance,
}

impl SortKey {
    /// Column name the backend understands for `sortBy`.
    pub fn backend_field(&self) -> &'static str {
        match self {
            SortKey::ImpactScore => "impactScore",
            SortKey::Date => "date",
            SortKey::VenueCapacity => "venueCapacity",
            SortKey::Distance => "distance",
        }
    }

    pub fn backend_direction(&self) -> &'static str {
        match self {
            SortKey::ImpactScore | SortKey::VenueCapacity => "desc",
            SortKey::Date | SortKey::Distance => "asc",
        }
    }
}

impl FromStr for SortKey {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "impact" | "impact_score" | "impactscore" => Ok(SortKey::ImpactScore),
            "date" => Ok(SortKey::Date),
            "capacity" | "venue_capacity" | "venuecapacity" => Ok(SortKey::VenueCapacity),
            "distance" | "distance_miles" => Ok(SortKey::Distance),
            other => Err(IntelError::InvalidArgument(format!("unknown sort key '{}'", other))),
        }
    }
}

/// `Some` before `None`, then ascending.
fn ascending_missing_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare(key: SortKey, a: &InternalEvent, b: &InternalEvent) -> Ordering {
    match key {
        SortKey::ImpactScore => b.impact_score.cmp(&a.impact_score),
        SortKey::Date => ascending_missing_last(a.starts_at(), b.starts_at()),
        SortKey::VenueCapacity => b.venue_capacity.cmp(&a.venue_capacity),
        SortKey::Distance => ascending_missing_last(a.distance_miles, b.distance_miles),
    }
}

/// Stable sort; `None` keeps the incoming order.
pub fn sort_events(events: &mut [InternalEvent], key: Option<SortKey>) {
    if let Some(key) = key {
        events.sort_by(|a, b| compare(key, a, b));
    }
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::{ImageQuality, ImpactLevel, TicketStatus, VenueTier, VenueType};

/// Metadata carried alongside the image chosen for an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub ratio: Option<String>,
    pub size: Option<String>,
    pub priority: u32,
    pub aspect_ratio: Option<f64>,
    pub file_size: String,
    pub quality: ImageQuality,
}

impl ImageMetadata {
    pub fn is_placeholder(&self) -> bool {
        self.quality == ImageQuality::Placeholder
    }

    /// Metadata for an image URL supplied as-is, with nothing known about it.
    pub fn unknown() -> Self {
        Self {
            width: None,
            height: None,
            ratio: None,
            size: None,
            priority: 10,
            aspect_ratio: None,
            file_size: "Unknown".to_string(),
            quality: ImageQuality::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedImage {
    pub url: String,
    pub metadata: ImageMetadata,
}

/// A scored event, built once per raw record per fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InternalEvent {
    pub id: Option<String>,
    pub name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue_name: String,
    pub venue_capacity: u32,
    pub venue_type: VenueType,
    pub venue_tier: VenueTier,
    pub venue_address: String,
    pub impact_score: u8,
    pub impact_level: ImpactLevel,
    pub ticket_price_range: String,
    pub ticket_status: TicketStatus,
    pub distance_miles: Option<f64>,
    pub estimated_attendance: u32,
    pub category: String,
    pub description: String,
    pub event_image: String,
    pub image_metadata: ImageMetadata,
    pub ticket_url: Option<String>,
}

impl InternalEvent {
    pub fn event_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    pub fn event_time(&self) -> Option<NaiveTime> {
        let raw = self.time.as_deref()?.trim();
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .ok()
    }

    /// Local start instant; midnight when the time is unknown.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let date = self.event_date()?;
        Some(date.and_time(self.event_time().unwrap_or(NaiveTime::MIN)))
    }

    pub fn has_real_image(&self) -> bool {
        !self.image_metadata.is_placeholder()
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::raw::de_opt_id;

/// Venue record from the backend, independent of the venue embedded in events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// `"lat,lon"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_hotel: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_search: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upcoming_events_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_office_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_seating_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_rule: Option<String>,
}

impl Venue {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Venue")
    }

    /// Number of filled-in detail fields, used to rank otherwise equal venues.
    pub fn completeness_score(&self) -> u32 {
        fn filled(v: &Option<String>) -> bool {
            v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
        }

        let checks = [
            self.capacity.map(|c| c > 0).unwrap_or(false),
            filled(&self.image_url),
            filled(&self.address),
            filled(&self.phone),
            filled(&self.box_office_hours),
            filled(&self.parking_detail),
            filled(&self.accessible_seating_detail),
            filled(&self.general_rule),
        ];
        checks.iter().filter(|c| **c).count() as u32
    }
}

/// Hotel configuration record. Effectively a singleton on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelConfig {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_address: Option<String>,
    /// `"lat,lon"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_search_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_impact_threshold: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_impact_threshold: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_frequency_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_system_connected: Option<bool>,
}

/// Settings for the third-party discovery key. Unknown keys pass through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketmasterSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_interval: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

//! Wire shapes as they arrive from the discovery provider and the backend.
//!
//! Every field is optional: mapping never fails on missing data, it defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts ids sent either as JSON strings or numbers.
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// An image candidate as offered by the discovery provider or the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageCandidate {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Ratio tag such as `16_9`, `3_2`, `4_3`.
    #[serde(default)]
    pub ratio: Option<String>,
    /// Named size tag such as `TABLET_LANDSCAPE_LARGE_16_9`.
    #[serde(default)]
    pub size: Option<String>,
}

impl ImageCandidate {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: Some(url.into()),
            width: Some(width),
            height: Some(height),
            ratio: None,
            size: None,
        }
    }

    /// Width and height, when both are known and non-zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub dates: Option<RawDates>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<RawEmbedded>,
    #[serde(default)]
    pub classifications: Option<Vec<RawClassification>>,
    #[serde(default)]
    pub price_ranges: Option<Vec<RawPriceRange>>,
    #[serde(default)]
    pub images: Option<Vec<ImageCandidate>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDates {
    #[serde(default)]
    pub start: Option<RawStart>,
    #[serde(default)]
    pub status: Option<RawStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStart {
    #[serde(default)]
    pub local_date: Option<String>,
    #[serde(default)]
    pub local_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmbedded {
    #[serde(default)]
    pub venues: Option<Vec<RawVenue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub address: Option<RawAddress>,
    #[serde(default)]
    pub city: Option<RawNamed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub line1: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNamed {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub segment: Option<RawNamed>,
    #[serde(default)]
    pub genre: Option<RawNamed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPriceRange {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl RawEvent {
    pub fn venue(&self) -> Option<&RawVenue> {
        self.embedded
            .as_ref()
            .and_then(|e| e.venues.as_ref())
            .and_then(|v| v.first())
    }

    pub fn status_code(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.status.as_ref())
            .and_then(|s| s.code.as_deref())
    }

    pub fn local_date(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.start.as_ref())
            .and_then(|s| s.local_date.as_deref())
    }

    pub fn local_time(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.start.as_ref())
            .and_then(|s| s.local_time.as_deref())
    }

    fn first_classification(&self) -> Option<&RawClassification> {
        self.classifications.as_ref().and_then(|c| c.first())
    }

    pub fn segment_name(&self) -> Option<&str> {
        self.first_classification()
            .and_then(|c| c.segment.as_ref())
            .and_then(|s| s.name.as_deref())
    }

    pub fn genre_name(&self) -> Option<&str> {
        self.first_classification()
            .and_then(|c| c.genre.as_ref())
            .and_then(|g| g.name.as_deref())
    }

    pub fn price_ranges(&self) -> &[RawPriceRange] {
        self.price_ranges.as_deref().unwrap_or(&[])
    }

    pub fn images(&self) -> &[ImageCandidate] {
        self.images.as_deref().unwrap_or(&[])
    }
}

/// Discovery-provider search response: `{ "_embedded": { "events": [...] }, "page": {...} }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<DiscoveryEmbedded>,
    #[serde(default)]
    pub page: Option<DiscoveryPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryEmbedded {
    #[serde(default)]
    pub events: Option<Vec<RawEvent>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPage {
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
}

impl DiscoveryResponse {
    pub fn events(&self) -> &[RawEvent] {
        self.embedded
            .as_ref()
            .and_then(|e| e.events.as_deref())
            .unwrap_or(&[])
    }
}

impl From<Vec<RawEvent>> for DiscoveryResponse {
    fn from(events: Vec<RawEvent>) -> Self {
        let total = events.len();
        DiscoveryResponse {
            embedded: Some(DiscoveryEmbedded { events: Some(events) }),
            page: Some(DiscoveryPage {
                size: Some(total as u32),
                total_elements: Some(total as u64),
                total_pages: Some(1),
                number: Some(0),
            }),
        }
    }
}

/// A search response from a JSON document holding a search response, an array, or a single event.
pub fn parse_discovery_response(json: &str) -> crate::error::Result<DiscoveryResponse> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let response = match value {
        serde_json::Value::Array(_) => DiscoveryResponse::from(serde_json::from_value::<Vec<RawEvent>>(value)?),
        serde_json::Value::Object(ref map) if map.contains_key("_embedded") || map.contains_key("page") => {
            serde_json::from_value(value)?
        }
        other => DiscoveryResponse::from(vec![serde_json::from_value::<RawEvent>(other)?]),
    };
    Ok(response)
}

/// Raw events from a JSON document: a search response, an array, or a single event.
pub fn parse_raw_events(json: &str) -> crate::error::Result<Vec<RawEvent>> {
    Ok(parse_discovery_response(json)?.events().to_vec())
}

/// Backend event record. Derived fields are recomputed locally on mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_images: Option<Vec<ImageCandidate>>,
}

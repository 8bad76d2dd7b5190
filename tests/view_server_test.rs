use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use hotel_event_intel::apis::{EventQuery, EventsPage, VenueQuery};
use hotel_event_intel::app::{DashboardService, EventSource, FixedClock};
use hotel_event_intel::config::{HotelSettings, ViewConfig};
use hotel_event_intel::domain::{HotelConfig, Venue};
use hotel_event_intel::server::build_router;
use hotel_event_intel::{IntelError, Result};

struct FakeBackend {
    healthy: bool,
}

#[async_trait]
impl EventSource for FakeBackend {
    async fn list_events(&self, _query: &EventQuery) -> Result<EventsPage> {
        if !self.healthy {
            return Err(IntelError::Endpoint {
                message: "Failed to fetch events",
                status: 502,
            });
        }
        let events = serde_json::from_value(json!([
            { "id": "1", "name": "Predators Home Opener", "date": "2026-10-20", "time": "19:00:00",
              "venue": "Bridgestone Arena", "venueCapacity": 17159, "venueType": "Sports",
              "impactScore": 92, "distance": 0.4 },
            { "id": "2", "name": "Opry Night", "date": "2026-10-21", "time": "19:00:00",
              "venue": "Ryman Auditorium", "venueType": "Music", "impactScore": 70, "distance": 0.8 },
            { "id": "3", "name": "Songwriter Round", "date": "2026-10-22", "time": "18:00:00",
              "venue": "The Bluebird Cafe", "venueType": "Music", "impactScore": 55, "distance": 6.5 },
            { "id": "4", "name": "Far Away Festival", "date": "2026-10-23", "time": "12:00:00",
              "venue": "Somewhere Amphitheater", "venueType": "Music", "impactScore": 80, "distance": 60.0 }
        ]))?;
        Ok(EventsPage {
            events,
            ..Default::default()
        })
    }

    async fn list_venues(&self, _query: &VenueQuery) -> Result<Vec<Venue>> {
        Ok(serde_json::from_value(json!([
            { "id": 1, "name": "Ryman Auditorium", "coordinates": "36.1612,-86.7785", "upcomingEventsCount": 4 },
            { "id": 2, "name": "Bridgestone Arena", "coordinates": "36.1591,-86.7785", "upcomingEventsCount": 9 }
        ]))?)
    }

    async fn list_config(&self) -> Result<Vec<HotelConfig>> {
        Ok(vec![])
    }
}

fn app(healthy: bool) -> axum::Router {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap();
    let service = DashboardService::new(
        Arc::new(FakeBackend { healthy }),
        HotelSettings::default(),
        ViewConfig::default(),
    )
    .with_clock(Arc::new(FixedClock(now)));
    build_router(Arc::new(service))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(true), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_events_view_filters_sorts_and_pages() {
    let (status, body) = get_json(app(true), "/view/events?venueType=Music&sortBy=impact&pageSize=1").await;
    assert_eq!(status, StatusCode::OK);

    // Default 25 mile radius drops the festival; Music keeps two of the rest.
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Opry Night");
    assert_eq!(items[0]["impact_level"], "MEDIUM");
    assert_eq!(body["data"]["pagination"]["totalElements"], 2);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], true);
    assert!(body.get("notice").is_none());
}

#[tokio::test]
async fn test_events_view_search_and_level() {
    let (_, body) = get_json(app(true), "/view/events?impactLevel=critical&distance=0").await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Predators Home Opener");

    let (_, body) = get_json(app(true), "/view/events?search=BLUEBIRD").await;
    assert_eq!(body["data"]["items"][0]["venue_name"], "The Bluebird Cafe");
}

#[tokio::test]
async fn test_huge_page_values_return_empty_pages() {
    let (status, body) = get_json(app(true), "/view/events?distance=0&page=18446744073709551615").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], false);

    let (status, body) = get_json(app(true), "/view/events?distance=0&pageSize=18446744073709551615").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_bad_filter_is_bad_request() {
    let (status, body) = get_json(app(true), "/view/events?sortBy=popularity").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("popularity"));
}

#[tokio::test]
async fn test_backend_failure_returns_empty_page_with_notice() {
    let (status, body) = get_json(app(false), "/view/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"]["totalElements"], 0);
    assert_eq!(body["notice"], "Failed to fetch events");
}

#[tokio::test]
async fn test_summary_and_venues() {
    let (_, body) = get_json(app(true), "/view/summary").await;
    assert_eq!(body["data"]["high_impact_this_week"], 2);
    assert_eq!(body["data"]["todays_events"], 0);

    let (_, body) = get_json(app(true), "/view/venues").await;
    let venues = body["data"].as_array().unwrap();
    assert_eq!(venues[0]["name"], "Bridgestone Arena");
    assert!(venues[0]["distanceFromHotel"].as_f64().is_some());
}

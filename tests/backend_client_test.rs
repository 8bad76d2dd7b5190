use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use hotel_event_intel::apis::{BackendClient, EventQuery, VenueQuery};
use hotel_event_intel::config::ApiConfig;
use hotel_event_intel::geo::GeoPoint;
use hotel_event_intel::view::SortKey;
use hotel_event_intel::IntelError;

type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn spawn_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> BackendClient {
    BackendClient::new(&ApiConfig {
        base_url: format!("http://{}/api", addr),
        timeout_seconds: Some(5),
    })
    .unwrap()
}

fn mock_backend(captured: Captured) -> Router {
    Router::new()
        .route(
            "/api/events",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(params);
                    Json(json!({
                        "events": [
                            {
                                "id": 1,
                                "name": "CMA Fest Kickoff",
                                "date": "2026-10-21",
                                "venue": "Bridgestone Arena",
                                "venueCapacity": 20000,
                                "impactScore": 88.0
                            },
                            { "id": "2", "name": "Open Mic" }
                        ],
                        "pagination": {
                            "currentPage": 0,
                            "pageSize": 1000,
                            "currentPageSize": 2,
                            "totalElements": 2,
                            "hasNextPage": false,
                            "hasPreviousPage": false
                        }
                    }))
                }
            }),
        )
        .route(
            "/api/venues",
            get(|| async { Json(json!([{ "message": "No venues found within 25 miles" }])) }),
        )
        .route(
            "/api/config",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
        )
}

#[tokio::test]
async fn test_list_events_sends_query_and_parses_page() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let addr = spawn_backend(mock_backend(captured.clone()));
    let client = client_for(addr);

    let query = EventQuery {
        start_date: Some("2026-10-19T10:00:00Z".into()),
        radius: Some(25.0),
        location: Some(GeoPoint::new(36.1656, -86.7781)),
        sort: Some(SortKey::ImpactScore),
        size: Some(1000),
        ..Default::default()
    };
    let page = client.list_events(&query).await.unwrap();

    assert_eq!(page.events.len(), 2);
    assert_eq!(page.events[0].id.as_deref(), Some("1"));
    assert_eq!(page.events[0].impact_score, Some(88.0));
    assert_eq!(page.pagination.total_elements, Some(2));
    assert_eq!(page.pagination.has_next_page, Some(false));

    let params = captured.lock().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0]["startDate"], "2026-10-19T10:00:00Z");
    assert_eq!(params[0]["radius"], "25");
    assert_eq!(params[0]["lat"], "36.1656");
    assert_eq!(params[0]["size"], "1000");
    assert!(params[0].contains_key("sortBy"));
    assert!(!params[0].contains_key("endDate"));
}

#[tokio::test]
async fn test_venue_sentinel_becomes_empty_list() {
    let addr = spawn_backend(mock_backend(Arc::new(Mutex::new(Vec::new()))));
    let client = client_for(addr);

    let venues = client
        .list_venues(&VenueQuery::around(GeoPoint::new(36.1656, -86.7781), 25.0))
        .await
        .unwrap();
    assert!(venues.is_empty());
}

#[tokio::test]
async fn test_error_status_carries_fixed_message() {
    let addr = spawn_backend(mock_backend(Arc::new(Mutex::new(Vec::new()))));
    let client = client_for(addr);

    let err = client.list_config().await.unwrap_err();
    match &err {
        IntelError::Endpoint { message, status } => {
            assert_eq!(*message, "Failed to fetch hotel config");
            assert_eq!(*status, 500);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_message(), "Failed to fetch hotel config");
}

#[tokio::test]
async fn test_unreachable_backend_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).list_config().await.unwrap_err();
    assert!(matches!(err, IntelError::Http(_)));
}

#[tokio::test]
async fn test_ticketmaster_toggle_posts_enabled_flag() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();
    let app = Router::new().route(
        "/api/integrations/ticketmaster/toggle",
        axum::routing::post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(body);
                Json(json!({ "success": true, "enabled": false, "message": "Integration disabled" }))
            }
        }),
    );
    let client = client_for(spawn_backend(app));

    let response = client.toggle_ticketmaster(false).await.unwrap();
    assert!(response.success);
    assert_eq!(response.enabled, Some(false));
    assert_eq!(seen.lock().unwrap().clone(), Some(json!({ "enabled": false })));
}

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::apis::{EventQuery, VenueQuery};
use crate::app::ports::{Clock, EventSource, SystemClock};
use crate::config::{HotelSettings, ViewConfig};
use crate::domain::{HotelConfig, InternalEvent, Venue};
use crate::error::IntelError;
use crate::imaging::stats::{image_coverage, ImageCoverage};
use crate::observability::metrics;
use crate::scoring::map_api_event;
use crate::view::analytics::DashboardSummary;
use crate::view::venues::{filter_venues, rank_venues, with_hotel_distances};
use crate::view::{apply_view, DateRange, PageRequest, SortKey, ViewFilters, ViewPage};

/// Result of a load. Backend failures leave `data` empty and set `notice`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<T> Loaded<T> {
    fn ok(data: T) -> Self {
        Self { data, notice: None }
    }

    fn fallback(data: T, resource: &'static str, error: &IntelError) -> Self {
        warn!(resource, error = %error, "Load failed, continuing with empty data");
        metrics::view::load_fallback(resource);
        Self {
            data,
            notice: Some(error.user_message()),
        }
    }
}

fn merge_notices(notices: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    let parts: Vec<String> = notices.into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Loads backend data and shapes it for the dashboard pages.
pub struct DashboardService {
    source: Arc<dyn EventSource>,
    clock: Arc<dyn Clock>,
    hotel: HotelSettings,
    view: ViewConfig,
}

impl DashboardService {
    pub fn new(source: Arc<dyn EventSource>, hotel: HotelSettings, view: ViewConfig) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            hotel,
            view,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn default_page_size(&self) -> usize {
        self.view.page_size
    }

    /// Configured date range and hotel radius; the other stages off.
    pub fn default_filters(&self) -> ViewFilters {
        ViewFilters {
            date_range: self.view.default_date_range().unwrap_or(DateRange::Month),
            max_distance: Some(self.hotel.default_radius_miles),
            ..Default::default()
        }
    }

    /// Fetches the events covering `filters` and maps them for display.
    pub async fn load_events(&self, filters: &ViewFilters, sort: Option<SortKey>) -> Loaded<Vec<InternalEvent>> {
        let load_id = Uuid::new_v4();
        let span = info_span!("load_events", %load_id, date_range = ?filters.date_range);
        self.fetch_events(filters, sort).instrument(span).await
    }

    async fn fetch_events(&self, filters: &ViewFilters, sort: Option<SortKey>) -> Loaded<Vec<InternalEvent>> {
        let query = EventQuery::for_view(
            filters,
            sort,
            self.hotel.location(),
            self.hotel.default_radius_miles,
            self.view.fetch_size,
            self.now(),
        );

        let page = match self.source.list_events(&query).await {
            Ok(page) => page,
            Err(e) => return Loaded::fallback(Vec::new(), "events", &e),
        };

        let events: Vec<InternalEvent> = page.events.iter().map(map_api_event).collect();
        metrics::mapping::events_mapped(events.len());
        for event in &events {
            metrics::mapping::impact_score_recorded(event.impact_score);
        }

        let coverage = image_coverage(&events);
        debug!(
            with_images = coverage.with_images,
            with_placeholders = coverage.with_placeholders,
            "Image coverage"
        );
        info!(count = events.len(), "Loaded events");
        Loaded::ok(events)
    }

    /// One page of the events view.
    pub async fn events_view(
        &self,
        filters: &ViewFilters,
        sort: Option<SortKey>,
        page: PageRequest,
    ) -> Loaded<ViewPage> {
        let loaded = self.load_events(filters, sort).await;
        let view = apply_view(&loaded.data, filters, sort, page, self.now());
        metrics::view::view_applied(view.pagination.total_elements);
        Loaded {
            data: view,
            notice: loaded.notice,
        }
    }

    pub async fn load_config(&self) -> Loaded<Option<HotelConfig>> {
        match self.source.list_config().await {
            Ok(configs) => Loaded::ok(configs.into_iter().next()),
            Err(e) => Loaded::fallback(None, "config", &e),
        }
    }

    /// Headline numbers for the landing page: the past week through the next 30 days.
    pub async fn summary(&self) -> Loaded<DashboardSummary> {
        let now = self.now();
        let week_ago = now.date() - Duration::days(6);
        let start = week_ago.and_hms_opt(0, 0, 0).unwrap_or(now);
        let filters = ViewFilters {
            date_range: DateRange::Custom {
                start,
                end: now + Duration::days(30),
            },
            ..Default::default()
        };

        let (events, config) = tokio::join!(self.load_events(&filters, None), self.load_config());
        let summary = DashboardSummary::build(&events.data, config.data, now);
        Loaded {
            data: summary,
            notice: merge_notices([events.notice, config.notice]),
        }
    }

    /// Venues near the hotel, ranked by activity.
    pub async fn venues(&self, search: &str, max_distance: Option<f64>) -> Loaded<Vec<Venue>> {
        let load_id = Uuid::new_v4();
        let span = info_span!("load_venues", %load_id);
        async {
            let hotel = self.hotel.location();
            let radius = max_distance.unwrap_or(self.hotel.default_radius_miles);
            match self.source.list_venues(&VenueQuery::around(hotel, radius)).await {
                Ok(venues) => {
                    let venues = with_hotel_distances(venues, hotel);
                    let mut venues = filter_venues(&venues, search, max_distance);
                    rank_venues(&mut venues);
                    info!(count = venues.len(), "Loaded venues");
                    Loaded::ok(venues)
                }
                Err(e) => Loaded::fallback(Vec::new(), "venues", &e),
            }
        }
        .instrument(span)
        .await
    }

    pub async fn image_coverage(&self, filters: &ViewFilters) -> Loaded<ImageCoverage> {
        let loaded = self.load_events(filters, None).await;
        Loaded {
            data: image_coverage(&loaded.data),
            notice: loaded.notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::EventsPage;
    use crate::app::ports::FixedClock;
    use crate::domain::ApiEvent;
    use crate::error::Result;
    use crate::view::test_support::now;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSource {
        events: Vec<ApiEvent>,
        venues: Vec<Venue>,
        fail: bool,
        queries: Mutex<Vec<EventQuery>>,
    }

    fn failure() -> IntelError {
        IntelError::Endpoint {
            message: "Failed to fetch events",
            status: 500,
        }
    }

    #[async_trait]
    impl EventSource for StubSource {
        async fn list_events(&self, query: &EventQuery) -> Result<EventsPage> {
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(failure());
            }
            Ok(EventsPage {
                events: self.events.clone(),
                ..Default::default()
            })
        }

        async fn list_venues(&self, _query: &VenueQuery) -> Result<Vec<Venue>> {
            if self.fail {
                return Err(IntelError::Endpoint {
                    message: "Failed to fetch venues",
                    status: 503,
                });
            }
            Ok(self.venues.clone())
        }

        async fn list_config(&self) -> Result<Vec<HotelConfig>> {
            Ok(vec![HotelConfig {
                hotel_name: Some("Test Hotel".into()),
                ..Default::default()
            }])
        }
    }

    fn api_event(name: &str, date: &str, score: f64) -> ApiEvent {
        serde_json::from_value(json!({
            "id": name,
            "name": name,
            "date": date,
            "time": "19:00:00",
            "venue": "Ryman Auditorium",
            "venueCapacity": 2362,
            "venueType": "Music",
            "impactScore": score,
            "distance": 1.2,
            "status": "onsale"
        }))
        .unwrap()
    }

    fn service(source: StubSource) -> DashboardService {
        DashboardService::new(Arc::new(source), HotelSettings::default(), ViewConfig::default())
            .with_clock(Arc::new(FixedClock(now())))
    }

    #[tokio::test]
    async fn test_events_view_maps_and_pages() {
        let source = StubSource {
            events: vec![
                api_event("a", "2026-10-20", 60.0),
                api_event("b", "2026-10-21", 95.0),
                api_event("c", "2026-10-22", 80.0),
            ],
            ..Default::default()
        };
        let service = service(source);
        let loaded = service
            .events_view(
                &ViewFilters::dashboard_defaults(),
                Some(SortKey::ImpactScore),
                PageRequest::new(0, 2),
            )
            .await;

        assert!(loaded.notice.is_none());
        let names: Vec<&str> = loaded.data.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(loaded.data.pagination.total_elements, 3);
        assert!(loaded.data.pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_backend_query_uses_hotel_and_window() {
        let stub = Arc::new(StubSource::default());
        let service = DashboardService::new(stub.clone(), HotelSettings::default(), ViewConfig::default())
            .with_clock(Arc::new(FixedClock(now())));
        service.load_events(&ViewFilters::dashboard_defaults(), None).await;

        let queries = stub.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].start_date.as_deref(), Some("2026-10-19T10:00:00Z"));
        assert_eq!(queries[0].end_date.as_deref(), Some("2026-11-19T00:00:00Z"));
        assert_eq!(queries[0].radius, Some(25.0));
        assert_eq!(queries[0].size, Some(1000));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_empty_with_notice() {
        let service = service(StubSource {
            fail: true,
            ..Default::default()
        });
        let loaded = service
            .events_view(&ViewFilters::default(), None, PageRequest::default())
            .await;

        assert!(loaded.data.items.is_empty());
        assert_eq!(loaded.data.pagination.total_pages, 0);
        assert_eq!(loaded.notice.as_deref(), Some("Failed to fetch events"));

        let venues = service.venues("", None).await;
        assert!(venues.data.is_empty());
        assert_eq!(venues.notice.as_deref(), Some("Failed to fetch venues"));
    }

    #[tokio::test]
    async fn test_summary_counts_today_and_week() {
        let source = StubSource {
            events: vec![
                api_event("today", "2026-10-19", 90.0),
                api_event("later", "2026-10-23", 78.0),
                api_event("far", "2026-11-10", 99.0),
            ],
            ..Default::default()
        };
        let loaded = service(source).summary().await;

        assert!(loaded.notice.is_none());
        assert_eq!(loaded.data.todays_events, 1);
        assert_eq!(loaded.data.high_impact_this_week, 2);
        assert_eq!(loaded.data.hotel.and_then(|h| h.hotel_name).as_deref(), Some("Test Hotel"));
    }

    #[tokio::test]
    async fn test_venues_get_hotel_distance_and_rank() {
        let venues: Vec<Venue> = serde_json::from_value(json!([
            { "id": 1, "name": "Quiet Room", "coordinates": "36.1627,-86.7816", "upcomingEventsCount": 1 },
            { "id": 2, "name": "Busy Arena", "coordinates": "36.1591,-86.7785", "upcomingEventsCount": 12 }
        ]))
        .unwrap();
        let loaded = service(StubSource {
            venues,
            ..Default::default()
        })
        .venues("", None)
        .await;

        assert_eq!(loaded.data.len(), 2);
        assert_eq!(loaded.data[0].name.as_deref(), Some("Busy Arena"));
        assert!(loaded.data.iter().all(|v| v.distance_from_hotel.is_some()));
    }

    #[test]
    fn test_default_filters_follow_config() {
        let service = DashboardService::new(
            Arc::new(StubSource::default()),
            HotelSettings {
                default_radius_miles: 10.0,
                ..Default::default()
            },
            ViewConfig {
                date_range: "week".into(),
                ..Default::default()
            },
        );
        let filters = service.default_filters();
        assert_eq!(filters.date_range, DateRange::Week);
        assert_eq!(filters.max_distance, Some(10.0));
        assert!(filters.search.is_empty());
    }

    #[test]
    fn test_merge_notices() {
        assert_eq!(merge_notices([None, None]), None);
        assert_eq!(
            merge_notices([Some("a".to_string()), None, Some("b".to_string())]).as_deref(),
            Some("a; b")
        );
    }
}

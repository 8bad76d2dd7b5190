use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::app::DashboardService;
use crate::config::ServerConfig;
use crate::error::{IntelError, Result};
use crate::observability::metrics;
use crate::view::{DateRange, PageRequest, SortKey, ViewFilters};

/// Error body for the view endpoints.
struct ApiError(IntelError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            IntelError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<IntelError> for ApiError {
    fn from(e: IntelError) -> Self {
        ApiError(e)
    }
}

/// "" and "all" switch a filter stage off.
fn parse_stage<T: FromStr<Err = IntelError>>(value: Option<&str>) -> std::result::Result<Option<T>, IntelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsParams {
    pub date_range: Option<String>,
    pub impact_level: Option<String>,
    pub venue_type: Option<String>,
    /// Miles; zero or less turns the distance stage off.
    pub distance: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl EventsParams {
    /// Unset parameters keep `defaults`.
    pub fn filters(&self, defaults: ViewFilters) -> std::result::Result<ViewFilters, IntelError> {
        let mut filters = defaults;
        if let Some(range) = self.date_range.as_deref() {
            filters.date_range = range.parse::<DateRange>()?;
        }
        filters.impact_level = parse_stage(self.impact_level.as_deref())?;
        filters.venue_type = parse_stage(self.venue_type.as_deref())?;
        if let Some(distance) = self.distance {
            filters.max_distance = Some(distance).filter(|d| *d > 0.0);
        }
        filters.search = self.search.clone().unwrap_or_default();
        Ok(filters)
    }

    pub fn sort(&self) -> std::result::Result<Option<SortKey>, IntelError> {
        parse_stage(self.sort_by.as_deref())
    }

    pub fn page(&self, default_size: usize) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(0), self.page_size.unwrap_or(default_size))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct VenueParams {
    pub search: Option<String>,
    /// Miles from the hotel.
    #[serde(alias = "distance")]
    pub radius: Option<f64>,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hotel-event-intel",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_handler() -> Response {
    match metrics::render() {
        Some(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

async fn view_events(
    Extension(service): Extension<Arc<DashboardService>>,
    Query(params): Query<EventsParams>,
) -> std::result::Result<Response, ApiError> {
    let filters = params.filters(service.default_filters())?;
    let sort = params.sort()?;
    let page = params.page(service.default_page_size());
    let loaded = service.events_view(&filters, sort, page).await;
    Ok(Json(loaded).into_response())
}

async fn view_summary(Extension(service): Extension<Arc<DashboardService>>) -> impl IntoResponse {
    Json(service.summary().await)
}

async fn view_venues(
    Extension(service): Extension<Arc<DashboardService>>,
    Query(params): Query<VenueParams>,
) -> impl IntoResponse {
    let search = params.search.unwrap_or_default();
    let distance = params.radius.filter(|d| *d > 0.0);
    Json(service.venues(&search, distance).await)
}

async fn view_images(
    Extension(service): Extension<Arc<DashboardService>>,
    Query(params): Query<EventsParams>,
) -> std::result::Result<Response, ApiError> {
    let filters = params.filters(service.default_filters())?;
    Ok(Json(service.image_coverage(&filters).await).into_response())
}

pub fn build_router(service: Arc<DashboardService>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/view/events", get(view_events))
        .route("/view/summary", get(view_summary))
        .route("/view/venues", get(view_venues))
        .route("/view/images", get(view_images))
        .layer(Extension(service))
        .layer(ServiceBuilder::new().layer(cors))
}

pub async fn run_server(config: &ServerConfig, service: Arc<DashboardService>) -> Result<()> {
    let app = build_router(service);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(%addr, "Starting view server");
    println!("🏨 View server running on http://localhost:{}", config.port);
    println!("💚 Health check: http://localhost:{}/health", config.port);
    println!("📈 Metrics:      http://localhost:{}/metrics", config.port);

    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| IntelError::Server(e.to_string()))
}

use std::time::Instant;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::query::{EventQuery, VenueQuery};
use crate::config::ApiConfig;
use crate::domain::{ApiEvent, HotelConfig, Venue};
use crate::error::{IntelError, Result};
use crate::observability::metrics;
use crate::view::ServerPagination;

/// A backend call: metric label plus the fixed message surfaced on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub failure: &'static str,
}

impl Endpoint {
    const fn new(name: &'static str, failure: &'static str) -> Self {
        Self { name, failure }
    }
}

pub mod endpoints {
    use super::Endpoint;

    pub const EVENTS_LIST: Endpoint = Endpoint::new("events.list", "Failed to fetch events");
    pub const EVENTS_CREATE: Endpoint = Endpoint::new("events.create", "Failed to create event");
    pub const EVENTS_UPDATE: Endpoint = Endpoint::new("events.update", "Failed to update event");
    pub const EVENTS_DELETE: Endpoint = Endpoint::new("events.delete", "Failed to delete event");
    pub const VENUES_LIST: Endpoint = Endpoint::new("venues.list", "Failed to fetch venues");
    pub const VENUES_CREATE: Endpoint = Endpoint::new("venues.create", "Failed to create venue");
    pub const VENUES_UPDATE: Endpoint = Endpoint::new("venues.update", "Failed to update venue");
    pub const VENUES_DELETE: Endpoint = Endpoint::new("venues.delete", "Failed to delete venue");
    pub const CONFIG_LIST: Endpoint = Endpoint::new("config.list", "Failed to fetch hotel config");
    pub const CONFIG_CREATE: Endpoint = Endpoint::new("config.create", "Failed to create hotel config");
    pub const CONFIG_UPDATE: Endpoint = Endpoint::new("config.update", "Failed to update hotel config");
    pub const CONFIG_DELETE: Endpoint = Endpoint::new("config.delete", "Failed to delete hotel config");
    pub const LLM_INVOKE: Endpoint = Endpoint::new("llm.invoke", "Failed to invoke LLM");
    pub const EMAIL_SEND: Endpoint = Endpoint::new("email.send", "Failed to send email");
    pub const FILE_UPLOAD: Endpoint = Endpoint::new("upload", "Failed to upload file");
    pub const IMAGE_GENERATE: Endpoint = Endpoint::new("image.generate", "Failed to generate image");
    pub const DATA_EXTRACT: Endpoint = Endpoint::new("extract", "Failed to extract data from file");
    pub const TICKETMASTER_GET: Endpoint =
        Endpoint::new("integrations.ticketmaster.get", "Failed to fetch Ticketmaster settings");
    pub const TICKETMASTER_SAVE: Endpoint =
        Endpoint::new("integrations.ticketmaster.save", "Failed to save Ticketmaster settings");
    pub const TICKETMASTER_TOGGLE: Endpoint =
        Endpoint::new("integrations.ticketmaster.toggle", "Failed to toggle Ticketmaster integration");
}

use endpoints::*;

/// One page of backend events plus whatever pagination the server reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventsPage {
    pub events: Vec<ApiEvent>,
    pub pagination: ServerPagination,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsResponse {
    Paged {
        events: Vec<ApiEvent>,
        #[serde(default)]
        pagination: Option<ServerPagination>,
    },
    Bare(Vec<ApiEvent>),
}

impl From<EventsResponse> for EventsPage {
    fn from(response: EventsResponse) -> Self {
        let (events, pagination) = match response {
            EventsResponse::Paged { events, pagination } => (events, pagination),
            EventsResponse::Bare(events) => (events, None),
        };
        let pagination = pagination.unwrap_or_else(|| ServerPagination {
            current_page: Some(0),
            page_size: Some(events.len() as u32),
            total_elements: Some(events.len() as u64),
            ..Default::default()
        });
        EventsPage { events, pagination }
    }
}

/// Thin client for the backend REST API. No retries, no caching.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Sends the request; non-2xx becomes the endpoint's fixed error.
    pub(crate) async fn execute(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<Response> {
        let started = Instant::now();
        let result = request.send().await;
        metrics::api::request_duration(endpoint.name, started.elapsed().as_secs_f64());

        match result {
            Ok(response) if response.status().is_success() => {
                metrics::api::request_success(endpoint.name);
                Ok(response)
            }
            Ok(response) => {
                metrics::api::request_error(endpoint.name);
                let status = response.status().as_u16();
                warn!(endpoint = endpoint.name, status, "Backend returned an error status");
                Err(IntelError::Endpoint { message: endpoint.failure, status })
            }
            Err(e) => {
                metrics::api::request_error(endpoint.name);
                warn!(endpoint = endpoint.name, error = %e, "Backend request failed");
                Err(e.into())
            }
        }
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<T> {
        let response = self.execute(endpoint, request).await?;
        Ok(response.json::<T>().await?)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn list_events(&self, query: &EventQuery) -> Result<EventsPage> {
        let request = self.client.get(self.url("events")).query(&query.to_params());
        let response: EventsResponse = self.fetch_json(EVENTS_LIST, request).await?;
        let page = EventsPage::from(response);
        debug!(count = page.events.len(), "Fetched events");
        Ok(page)
    }

    pub async fn create_event(&self, event: &ApiEvent) -> Result<ApiEvent> {
        let request = self.client.post(self.url("events")).json(event);
        self.fetch_json(EVENTS_CREATE, request).await
    }

    pub async fn update_event(&self, id: &str, event: &ApiEvent) -> Result<ApiEvent> {
        let request = self.client.put(self.url(&format!("events/{}", id))).json(event);
        self.fetch_json(EVENTS_UPDATE, request).await
    }

    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let request = self.client.delete(self.url(&format!("events/{}", id)));
        self.execute(EVENTS_DELETE, request).await.map(|_| ())
    }

    // ------------------------------------------------------------------
    // Venues
    // ------------------------------------------------------------------

    /// Venues around a point. The backend's `[{"message": ...}]` empty-result sentinel yields an empty list.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn list_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>> {
        let request = self.client.get(self.url("venues")).query(&query.to_params());
        let raw: Vec<Value> = self.fetch_json(VENUES_LIST, request).await?;
        Ok(venues_from_values(raw))
    }

    pub async fn create_venue(&self, venue: &Venue) -> Result<Venue> {
        let request = self.client.post(self.url("venues")).json(venue);
        self.fetch_json(VENUES_CREATE, request).await
    }

    pub async fn update_venue(&self, id: &str, venue: &Venue) -> Result<Venue> {
        let request = self.client.put(self.url(&format!("venues/{}", id))).json(venue);
        self.fetch_json(VENUES_UPDATE, request).await
    }

    pub async fn delete_venue(&self, id: &str) -> Result<()> {
        let request = self.client.delete(self.url(&format!("venues/{}", id)));
        self.execute(VENUES_DELETE, request).await.map(|_| ())
    }

    // ------------------------------------------------------------------
    // Hotel config
    // ------------------------------------------------------------------

    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn list_config(&self) -> Result<Vec<HotelConfig>> {
        let request = self.client.get(self.url("config"));
        self.fetch_json(CONFIG_LIST, request).await
    }

    pub async fn create_config(&self, config: &HotelConfig) -> Result<HotelConfig> {
        let request = self.client.post(self.url("config")).json(config);
        self.fetch_json(CONFIG_CREATE, request).await
    }

    pub async fn update_config(&self, id: &str, config: &HotelConfig) -> Result<HotelConfig> {
        let request = self.client.put(self.url(&format!("config/{}", id))).json(config);
        self.fetch_json(CONFIG_UPDATE, request).await
    }

    pub async fn delete_config(&self, id: &str) -> Result<()> {
        let request = self.client.delete(self.url(&format!("config/{}", id)));
        self.execute(CONFIG_DELETE, request).await.map(|_| ())
    }
}

/// Keeps entries that look like venues; sentinel and error objects are dropped.
fn venues_from_values(raw: Vec<Value>) -> Vec<Venue> {
    raw.into_iter()
        .filter(|v| v.get("name").map(|n| n.is_string()).unwrap_or(false))
        .filter_map(|v| match serde_json::from_value::<Venue>(v) {
            Ok(venue) => Some(venue),
            Err(e) => {
                debug!(error = %e, "Skipping malformed venue record");
                None
            }
        })
        .collect()
}

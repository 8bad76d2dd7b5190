use async_trait::async_trait;

use crate::apis::{BackendClient, EventQuery, EventsPage, VenueQuery};
use crate::app::ports::EventSource;
use crate::domain::{HotelConfig, Venue};
use crate::error::Result;

#[async_trait]
impl EventSource for BackendClient {
    async fn list_events(&self, query: &EventQuery) -> Result<EventsPage> {
        BackendClient::list_events(self, query).await
    }

    async fn list_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>> {
        BackendClient::list_venues(self, query).await
    }

    async fn list_config(&self) -> Result<Vec<HotelConfig>> {
        BackendClient::list_config(self).await
    }
}

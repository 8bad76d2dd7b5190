use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::apis::{EventQuery, EventsPage, VenueQuery};
use crate::domain::{HotelConfig, Venue};
use crate::error::Result;

/// Read side of the backend as the dashboard loads it.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(&self, query: &EventQuery) -> Result<EventsPage>;
    async fn list_venues(&self, query: &VenueQuery) -> Result<Vec<Venue>>;
    async fn list_config(&self) -> Result<Vec<HotelConfig>>;
}

pub trait Clock: Send + Sync {
    /// Local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

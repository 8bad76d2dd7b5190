// Backend REST API client

pub mod backend;
pub mod integrations;
pub mod query;

pub use backend::{BackendClient, Endpoint, EventsPage};
pub use integrations::IntegrationResponse;
pub use query::{DistanceUnit, EventQuery, VenueQuery};

// Domain data shapes shared across layers

pub mod enums;
pub mod event;
pub mod raw;
pub mod venue;

pub use enums::{ImageQuality, ImpactLevel, TicketStatus, VenueTier, VenueType};
pub use event::{ImageMetadata, InternalEvent, SelectedImage};
pub use raw::{parse_discovery_response, parse_raw_events, ApiEvent, DiscoveryResponse, ImageCandidate, RawEvent};
pub use venue::{HotelConfig, TicketmasterSettings, Venue};

//! Event mapping and impact scoring.

pub mod capacity;
pub mod impact;
pub mod mapper;

pub use capacity::estimate_capacity;
pub use impact::ScoreBreakdown;
pub use mapper::{explain_score, map_api_event, map_discovery_response, map_event};

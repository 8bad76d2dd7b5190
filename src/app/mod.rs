pub mod dashboard;
pub mod ports;

pub use dashboard::{DashboardService, Loaded};
pub use ports::{Clock, EventSource, FixedClock, SystemClock};

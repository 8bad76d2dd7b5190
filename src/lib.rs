// Backend client and wire queries
pub mod apis;
pub mod config;
pub mod error;
pub mod geo;
pub mod server;

// Use cases and the ports they depend on
pub mod app;
pub mod infra;

// Domain data shapes shared across layers
pub mod domain;

// Pure event pipeline: scoring, image selection, view shaping
pub mod imaging;
pub mod scoring;
pub mod view;

pub mod observability;

pub use error::{IntelError, Result};

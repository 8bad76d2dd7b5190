// Adapters binding application ports to concrete clients

pub mod backend_source;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx answer from the backend. The message is fixed per endpoint.
    #[error("{message} (status {status})")]
    Endpoint { message: &'static str, status: u16 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl IntelError {
    /// The user-facing message, without transport details.
    pub fn user_message(&self) -> String {
        match self {
            IntelError::Endpoint { message, .. } => (*message).to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntelError>;

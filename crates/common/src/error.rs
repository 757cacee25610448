//! Error types for Vitrine

use thiserror::Error;

/// Result type alias using Vitrine Error
pub type Result<T> = std::result::Result<T, Error>;

/// Vitrine error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the error came from talking to the catalog API
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Decode(_) | Error::Http { .. })
    }
}

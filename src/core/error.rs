use std::io;
use thiserror::Error;

/// Unified error type for the guidechat application
#[derive(Error, Debug)]
pub enum GuideError {
    /// Errors reported by the generation endpoint
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for GuideError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GuideError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            GuideError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            GuideError::Api(format!("API returned error status: {}", err))
        } else {
            GuideError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for GuideError {
    fn from(err: serde_json::Error) -> Self {
        GuideError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for GuideError {
    fn from(err: serde_yml::Error) -> Self {
        GuideError::Serialization(format!("YAML error: {}", err))
    }
}

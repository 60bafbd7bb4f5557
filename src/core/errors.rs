//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No credential was available when the translator was built
    #[error("{provider} client is not configured: missing API key")]
    ClientNotConfigured {
        provider: String,
    },

    /// Request rejected before any network call
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimitError {
        retry_after: Option<u64>,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Missing required field in the response
    #[error("Missing required field: {field}")]
    MissingField {
        field: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Network-level or remote-side failure during the round trip
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            TranslationError::ApiError { .. }
                | TranslationError::RateLimitError { .. }
                | TranslationError::NetworkError { .. }
                | TranslationError::TimeoutError
                | TranslationError::HttpError(_)
        )
    }

    /// The service answered, but not with what we asked for
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            TranslationError::InvalidResponseError { .. } | TranslationError::MissingField { .. }
        )
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        TranslationError::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

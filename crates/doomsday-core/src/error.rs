use thiserror::Error;

/// Result type alias for doomsday operations
pub type Result<T> = std::result::Result<T, DoomsdayError>;

/// Errors that can occur while enumerating or probing the firmware catalog
#[derive(Error, Debug)]
pub enum DoomsdayError {
    /// The device list could not be retrieved; nothing can be audited
    #[error("unable to retrieve firmware information: {0}")]
    CatalogUnavailable(String),

    /// The firmware list for a single device could not be retrieved
    #[error("could not get firmwares for device {device}: {reason}")]
    DeviceLookupFailed {
        /// Identifier of the device whose lookup failed
        device: String,
        /// Underlying cause
        reason: String,
    },

    /// A download probe could not complete at the transport level
    #[error("probe transport error: {0}")]
    ProbeTransport(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DoomsdayError {
    /// Returns true if the error must abort the whole audit run
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::CatalogUnavailable(_))
    }
}

//! Upstream transport error types.

/// The upstream call could not be completed or was rejected.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key was rejected
    #[error("unauthorized: check API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by upstream API")]
    RateLimited,

    /// API returned another non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API key cannot be sent as a header value
    #[error("invalid API key format")]
    InvalidApiKey,
}

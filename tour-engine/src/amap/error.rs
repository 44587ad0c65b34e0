//! Amap client error types.

/// Errors from the Amap HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum AmapError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The API reported an application-level error
    /// (`status == "0"` on V3/V5, `errcode != 0` on V4)
    #[error("Amap API error: {info} (code={code})")]
    Api { info: String, code: String },

    /// Non-2xx HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// API key missing or rejected
    #[error("not configured: {0}")]
    NotConfigured(String),
}

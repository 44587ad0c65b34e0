//! Rail client error types.

/// Errors from the rail ticket bridge.
///
/// All of these are treated as a soft `Unavailable` by callers, which fall
/// back to the generic transit route rather than failing the leg.
#[derive(Debug, thiserror::Error)]
pub enum RailError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Non-2xx HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Neither direct lookup nor the city fallback matched a station
    #[error("no rail station matched for '{0}'")]
    StationNotFound(String),

    /// The ticket query returned no usable train options
    #[error("no trains found between {from} and {to}")]
    NoTrains { from: String, to: String },

    /// Base URL missing
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RailError::StationNotFound("West Lake".into());
        assert_eq!(err.to_string(), "no rail station matched for 'West Lake'");

        let err = RailError::NoTrains {
            from: "VAP".into(),
            to: "SHH".into(),
        };
        assert_eq!(err.to_string(), "no trains found between VAP and SHH");
    }
}

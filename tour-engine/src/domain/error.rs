//! Engine-level error taxonomy.
//!
//! These are the failures surfaced to callers of the tour builder. They are
//! distinct from the per-provider transport errors, which are folded into
//! `Provider` at the boundary.

use super::TransportMode;

/// Errors from route resolution and tour building.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteError {
    /// Resolution produced no usable coordinates for a place name.
    /// Non-fatal in batch contexts: the item is dropped with a warning.
    #[error("no location found for '{0}'")]
    NotFound(String),

    /// A provider call failed (transport error, timeout, non-2xx,
    /// malformed payload).
    #[error("provider error: {0}")]
    Provider(String),

    /// No path or itinerary was returned for a leg.
    #[error("could not calculate a route from '{from}' to '{to}'")]
    Unavailable { from: String, to: String },

    /// The requested mode is implausible for the leg distance.
    /// Carries a human-readable suggestion instead of a raw threshold.
    #[error("{mode} is not suitable for a {distance_km:.1} km leg; consider {suggestion}")]
    ModeNotSuitable {
        mode: TransportMode,
        distance_km: f64,
        suggestion: String,
    },

    /// Missing credentials or other service-level misconfiguration.
    /// Fails service construction, never an individual request.
    #[error("not configured: {0}")]
    Configuration(String),

    /// None of the requested locations could be resolved.
    #[error("no valid locations found")]
    NoLocations,
}

impl RouteError {
    /// Stable machine-readable tag for the public surface.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::NotFound(_) => "not_found",
            RouteError::Provider(_) => "provider_error",
            RouteError::Unavailable { .. } => "unavailable",
            RouteError::ModeNotSuitable { .. } => "mode_not_suitable",
            RouteError::Configuration(_) => "configuration",
            RouteError::NoLocations => "no_locations",
        }
    }
}

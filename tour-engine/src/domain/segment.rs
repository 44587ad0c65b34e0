//! Route legs and rail lookups.

use serde::Serialize;

use super::Point;

/// One directed hop between two consecutive tour points.
///
/// Never persisted; built fresh from provider data for each request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub origin: Point,
    pub destination: Point,
    pub distance_km: f64,
    pub duration_minutes: f64,
    /// Human-readable mode. For transit this may concatenate several line
    /// names with " + " (e.g. "Line 2 + Line 10").
    pub mode_label: String,
    /// Ordered turn-by-turn or boarding instructions.
    pub steps: Vec<String>,
}

/// Ephemeral mapping from a point to a rail-network station.
///
/// Scoped to a single rail lookup; station codes are never cached across
/// requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRef {
    pub code: String,
    pub name: String,
}

/// A real train option returned by the ticket provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainInfo {
    pub train_code: String,
    pub from_station: String,
    pub to_station: String,
    pub depart: String,
    pub arrive: String,
    pub duration_minutes: f64,
    /// Price of the first seat class with a non-zero fare, if any.
    pub price: Option<f64>,
    /// Great-circle distance between the resolved endpoints. The ticket
    /// provider reports no track distance, so this is an approximation.
    pub distance_km: f64,
}

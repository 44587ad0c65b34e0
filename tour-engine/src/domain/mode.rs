//! Transport modes, tour strategies and leg-selection preferences.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A single transport mode for one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Driving,
    Walking,
    Cycling,
    Transit,
    Train,
    Flight,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Transit => "transit",
            TransportMode::Train => "train",
            TransportMode::Flight => "flight",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(TransportMode::Driving),
            "walking" => Ok(TransportMode::Walking),
            "cycling" | "bicycling" => Ok(TransportMode::Cycling),
            "transit" => Ok(TransportMode::Transit),
            "train" => Ok(TransportMode::Train),
            "flight" => Ok(TransportMode::Flight),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Error for an unrecognised mode or strategy string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct UnknownMode(pub String);

/// Strategy for a whole tour.
///
/// A fixed strategy commits every leg to one mode. The smart strategy
/// compares driving and transit per leg and picks by [`Preference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Fixed(TransportMode),
    Smart,
}

impl FromStr for Strategy {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" | "best" | "recommend" => Ok(Strategy::Smart),
            other => TransportMode::from_str(other).map(Strategy::Fixed),
        }
    }
}

/// Tie-breaking preference for smart-strategy leg selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    #[default]
    Time,
    Distance,
    TransitFirst,
    DrivingFirst,
}

impl FromStr for Preference {
    type Err = std::convert::Infallible;

    /// Unrecognised preferences fall back to `Time`, matching the
    /// permissive behaviour of the public surface.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "distance" => Preference::Distance,
            "transit_first" => Preference::TransitFirst,
            "driving_first" => Preference::DrivingFirst,
            _ => Preference::Time,
        })
    }
}

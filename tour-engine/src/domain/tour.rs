//! Assembled tours.

use serde::Serialize;

use super::{Point, Segment};

/// Outcome of one leg of a tour.
///
/// A leg with no usable provider response is recorded as `Failed` rather
/// than dropped, so the legs always line up with consecutive point pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TourLeg {
    Resolved(Segment),
    Failed {
        from: String,
        to: String,
        error: String,
    },
}

impl TourLeg {
    pub fn segment(&self) -> Option<&Segment> {
        match self {
            TourLeg::Resolved(s) => Some(s),
            TourLeg::Failed { .. } => None,
        }
    }
}

/// An ordered visiting sequence with per-leg detail.
///
/// The point sequence is a permutation of the successfully resolved inputs;
/// the first point is always the first input that resolved. `legs` has
/// exactly `points.len() - 1` entries, some of which may be failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub points: Vec<Point>,
    pub legs: Vec<TourLeg>,
    /// Sum over resolved legs only.
    pub total_distance_km: f64,
    /// Sum over resolved legs only, in hours.
    pub total_duration_hours: f64,
}

impl Tour {
    /// Visiting order by point name.
    pub fn order(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.name.as_str()).collect()
    }
}

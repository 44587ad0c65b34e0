//! Heuristic cost estimation.
//!
//! These are documented placeholders mapping (mode, distance) to an
//! estimated fare, not a pricing API. For train legs the real ticket price
//! from the rail resolver supersedes the heuristic when available.

use std::collections::HashMap;

use crate::domain::{RouteError, TransportMode};

/// Estimate the cost of a leg in currency units.
///
/// - driving: max(10, distance × 3.5)
/// - transit: distance < 20 → 2 + ⌊distance / 5⌋; else distance × 0.5
/// - flight: 150 + distance × 0.8
/// - train: distance × 0.5
/// - walking / cycling: 0
pub fn estimate(mode: TransportMode, distance_km: f64) -> f64 {
    match mode {
        TransportMode::Driving => (distance_km * 3.5).max(10.0),
        TransportMode::Transit => {
            if distance_km < 20.0 {
                2.0 + (distance_km / 5.0).floor()
            } else {
                distance_km * 0.5
            }
        }
        TransportMode::Flight => 150.0 + distance_km * 0.8,
        TransportMode::Train => distance_km * 0.5,
        TransportMode::Walking | TransportMode::Cycling => 0.0,
    }
}

/// Plausible distance range per mode, in kilometres.
///
/// The table is currently empty, making [`check`] a no-op; the structure
/// is kept so thresholds can be introduced without reshaping the API.
///
/// [`check`]: ModeDistanceLimits::check
#[derive(Debug, Clone, Default)]
pub struct ModeDistanceLimits {
    limits: HashMap<TransportMode, (f64, f64)>,
}

impl ModeDistanceLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a (min, max) plausible range for a mode.
    pub fn with_limit(mut self, mode: TransportMode, min_km: f64, max_km: f64) -> Self {
        self.limits.insert(mode, (min_km, max_km));
        self
    }

    /// Check a leg's distance against the mode's plausible range.
    ///
    /// A violation produces `ModeNotSuitable` with suggested alternatives
    /// rather than a raw threshold.
    pub fn check(&self, mode: TransportMode, distance_km: f64) -> Result<(), RouteError> {
        let Some(&(min_km, max_km)) = self.limits.get(&mode) else {
            return Ok(());
        };

        if distance_km < min_km || distance_km > max_km {
            return Err(RouteError::ModeNotSuitable {
                mode,
                distance_km,
                suggestion: suggest_alternatives(mode, distance_km),
            });
        }

        Ok(())
    }
}

fn suggest_alternatives(mode: TransportMode, distance_km: f64) -> String {
    match (mode, distance_km) {
        (TransportMode::Walking | TransportMode::Cycling, d) if d > 30.0 => {
            "driving, transit or train".to_string()
        }
        (TransportMode::Flight, d) if d < 300.0 => "train or driving".to_string(),
        (TransportMode::Driving | TransportMode::Transit, d) if d > 800.0 => {
            "train or flight".to_string()
        }
        _ => "a different mode".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driving_floor_applies() {
        assert_eq!(estimate(TransportMode::Driving, 2.0), 10.0);
        assert_eq!(estimate(TransportMode::Driving, 10.0), 35.0);
    }

    #[test]
    fn transit_tiers() {
        assert_eq!(estimate(TransportMode::Transit, 3.0), 2.0);
        assert_eq!(estimate(TransportMode::Transit, 12.0), 4.0);
        assert_eq!(estimate(TransportMode::Transit, 40.0), 20.0);
    }

    #[test]
    fn flight_and_train() {
        assert_eq!(estimate(TransportMode::Flight, 100.0), 230.0);
        assert_eq!(estimate(TransportMode::Train, 100.0), 50.0);
    }

    #[test]
    fn active_modes_are_free() {
        assert_eq!(estimate(TransportMode::Walking, 5.0), 0.0);
        assert_eq!(estimate(TransportMode::Cycling, 15.0), 0.0);
    }

    #[test]
    fn empty_limits_accept_everything() {
        let limits = ModeDistanceLimits::new();
        assert!(limits.check(TransportMode::Walking, 5000.0).is_ok());
        assert!(limits.check(TransportMode::Flight, 0.1).is_ok());
    }

    #[test]
    fn violated_limit_suggests_alternatives() {
        let limits = ModeDistanceLimits::new().with_limit(TransportMode::Walking, 0.0, 30.0);

        assert!(limits.check(TransportMode::Walking, 10.0).is_ok());
        let err = limits.check(TransportMode::Walking, 120.0).unwrap_err();
        match err {
            RouteError::ModeNotSuitable { suggestion, .. } => {
                assert!(suggestion.contains("train"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

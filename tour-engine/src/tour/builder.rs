//! Tour orchestration and single-leg quoting.

use futures::future::join_all;
use serde::Serialize;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

use crate::cost::{self, ModeDistanceLimits};
use crate::domain::{
    Point, Preference, RouteError, Segment, Strategy, Tour, TourLeg, TrainInfo, TransportMode,
    haversine_km,
};
use crate::geo::{GeoResolver, PlaceProvider};
use crate::rail::{RailProvider, RailResolver};
use crate::segment::{DirectionsProvider, SegmentRouter};

use super::order::greedy_order;

/// Configuration for tour building.
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// Pause between the two serial geocoding calls of a single-leg quote,
    /// keeping ad hoc queries under the provider's per-second quota.
    pub geocode_pause_ms: u64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            geocode_pause_ms: 300,
        }
    }
}

/// Result of a single-leg quote: one segment plus a cost estimate.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentQuote {
    pub origin: Point,
    pub destination: Point,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub cost_estimate: f64,
    pub mode: TransportMode,
    /// Boarding/turn instructions for the chosen route.
    pub transit_steps: Vec<String>,
    /// Real train data when the rail lookup succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train: Option<TrainInfo>,
}

/// Top-level orchestrator for tour construction.
pub struct TourBuilder<P, D, R> {
    geo: GeoResolver<P>,
    router: SegmentRouter<D>,
    rail: RailResolver<R>,
    config: TourConfig,
    limits: ModeDistanceLimits,
}

impl<P, D, R> TourBuilder<P, D, R>
where
    P: PlaceProvider,
    D: DirectionsProvider,
    R: RailProvider,
{
    pub fn new(
        geo: GeoResolver<P>,
        router: SegmentRouter<D>,
        rail: RailResolver<R>,
        config: TourConfig,
    ) -> Self {
        Self {
            geo,
            router,
            rail,
            config,
            limits: ModeDistanceLimits::default(),
        }
    }

    /// Replace the mode-distance plausibility table.
    pub fn with_limits(mut self, limits: ModeDistanceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve, order and route a whole tour.
    ///
    /// All names are resolved concurrently; names that fail to resolve are
    /// dropped with a warning rather than aborting the batch. The ordered
    /// sequence always starts at the first input that resolved. Legs that
    /// cannot be routed are recorded as failures and excluded from the
    /// totals; the tour is returned even when some legs failed.
    pub async fn optimize_route(
        &self,
        names: &[String],
        city: &str,
        strategy: Strategy,
        preference: Preference,
    ) -> Result<Tour, RouteError> {
        let lookups = names
            .iter()
            .map(|name| async move { (name.as_str(), self.geo.resolve(name, city).await) });

        let mut points = Vec::new();
        for (name, result) in join_all(lookups).await {
            match result {
                Ok(point) => points.push(point),
                Err(e) => warn!(name, error = %e, "dropping unresolvable location"),
            }
        }

        if points.is_empty() {
            return Err(RouteError::NoLocations);
        }

        let path = greedy_order(points);

        let mut legs = Vec::with_capacity(path.len().saturating_sub(1));
        let mut total_distance_km = 0.0;
        let mut total_minutes = 0.0;

        for pair in path.windows(2) {
            let (origin, destination) = (&pair[0], &pair[1]);
            match self.leg(origin, destination, strategy, preference).await {
                Ok(segment) => {
                    total_distance_km += segment.distance_km;
                    total_minutes += segment.duration_minutes;
                    legs.push(TourLeg::Resolved(segment));
                }
                Err(e) => {
                    warn!(
                        from = %origin.name, to = %destination.name, error = %e,
                        "leg could not be routed"
                    );
                    legs.push(TourLeg::Failed {
                        from: origin.name.clone(),
                        to: destination.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(Tour {
            points: path,
            legs,
            total_distance_km,
            total_duration_hours: total_minutes / 60.0,
        })
    }

    /// Quote a single leg between two named places.
    ///
    /// The two endpoints are resolved serially with a pause in between;
    /// unlike the batched tour fan-out, ad hoc quotes would otherwise
    /// burst straight past the geocoding quota.
    pub async fn calculate_segment(
        &self,
        origin_name: &str,
        dest_name: &str,
        mode: TransportMode,
        city: &str,
    ) -> Result<SegmentQuote, RouteError> {
        let origin = self.geo.resolve(origin_name, city).await?;
        if self.config.geocode_pause_ms > 0 {
            sleep(Duration::from_millis(self.config.geocode_pause_ms)).await;
        }
        let destination = self.geo.resolve(dest_name, city).await?;

        self.limits
            .check(mode, haversine_km(&origin, &destination))?;

        let (segment, train) = match mode {
            TransportMode::Train => match self.rail.query_train(&origin, &destination).await {
                Ok(info) => (train_segment(&origin, &destination, &info), Some(info)),
                Err(e) => {
                    warn!(error = %e, "rail lookup failed, falling back to transit");
                    let mut segment = self
                        .router
                        .route(&origin, &destination, TransportMode::Transit)
                        .await?;
                    segment.mode_label = TransportMode::Train.as_str().to_string();
                    (segment, None)
                }
            },
            _ => (self.router.route(&origin, &destination, mode).await?, None),
        };

        // The real ticket price supersedes the heuristic when we have one.
        let cost_estimate = train
            .as_ref()
            .and_then(|t| t.price)
            .unwrap_or_else(|| cost::estimate(mode, segment.distance_km));

        Ok(SegmentQuote {
            origin: segment.origin.clone(),
            destination: segment.destination.clone(),
            distance_km: segment.distance_km,
            duration_minutes: segment.duration_minutes,
            cost_estimate,
            mode,
            transit_steps: segment.steps,
            train,
        })
    }

    async fn leg(
        &self,
        origin: &Point,
        destination: &Point,
        strategy: Strategy,
        preference: Preference,
    ) -> Result<Segment, RouteError> {
        match strategy {
            Strategy::Smart => {
                let (driving, transit) = tokio::join!(
                    self.router.route(origin, destination, TransportMode::Driving),
                    self.router.route(origin, destination, TransportMode::Transit),
                );

                let driving = driving
                    .map_err(|e| debug!(error = %e, "driving comparison failed"))
                    .ok();
                let transit = transit
                    .map_err(|e| debug!(error = %e, "transit comparison failed"))
                    .ok();

                choose_preferred(driving, transit, preference).ok_or_else(|| {
                    RouteError::Unavailable {
                        from: origin.name.clone(),
                        to: destination.name.clone(),
                    }
                })
            }
            Strategy::Fixed(TransportMode::Train) => self.train_leg(origin, destination).await,
            Strategy::Fixed(mode) => self.router.route(origin, destination, mode).await,
        }
    }

    /// Rail-first leg with a soft fallback to generic transit.
    async fn train_leg(
        &self,
        origin: &Point,
        destination: &Point,
    ) -> Result<Segment, RouteError> {
        match self.rail.query_train(origin, destination).await {
            Ok(info) => Ok(train_segment(origin, destination, &info)),
            Err(e) => {
                warn!(
                    from = %origin.name, to = %destination.name, error = %e,
                    "rail lookup failed, falling back to transit"
                );
                let mut segment = self
                    .router
                    .route(origin, destination, TransportMode::Transit)
                    .await?;
                // Sourced from transit data, but the leg is still a train leg.
                segment.mode_label = TransportMode::Train.as_str().to_string();
                Ok(segment)
            }
        }
    }
}

/// Pick between a driving and a transit segment for one leg.
///
/// With both present the preference decides; with one present it wins
/// regardless of preference; with neither there is no segment.
pub fn choose_preferred(
    driving: Option<Segment>,
    transit: Option<Segment>,
    preference: Preference,
) -> Option<Segment> {
    match (driving, transit) {
        (Some(d), Some(t)) => Some(match preference {
            Preference::Distance => {
                if d.distance_km <= t.distance_km {
                    d
                } else {
                    t
                }
            }
            Preference::TransitFirst => t,
            Preference::DrivingFirst => d,
            Preference::Time => {
                if d.duration_minutes <= t.duration_minutes {
                    d
                } else {
                    t
                }
            }
        }),
        (Some(d), None) => Some(d),
        (None, Some(t)) => Some(t),
        (None, None) => None,
    }
}

/// Build a segment from real train data.
fn train_segment(origin: &Point, destination: &Point, info: &TrainInfo) -> Segment {
    let mut steps = vec![format!(
        "Take {} ({} {} -> {} {})",
        info.train_code, info.from_station, info.depart, info.to_station, info.arrive
    )];
    if let Some(price) = info.price {
        steps.push(format!("Fare from {price:.1}"));
    }

    Segment {
        origin: origin.clone(),
        destination: destination.clone(),
        distance_km: info.distance_km,
        duration_minutes: info.duration_minutes,
        mode_label: info.train_code.clone(),
        steps,
    }
}

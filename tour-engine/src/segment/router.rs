//! Mode-dispatched routing between two resolved points.

use tracing::debug;

use crate::amap::{AmapClient, AmapError, DirectionsResponse, PathMode};
use crate::domain::{Point, RouteError, Segment, TransportMode};

use super::convert::{normalize_path, normalize_transit};

/// Trait for the direction-search provider.
///
/// This abstraction allows the router to be tested with mock payloads.
pub trait DirectionsProvider {
    /// Single-best-path directions for driving, walking or cycling.
    fn directions(
        &self,
        mode: PathMode,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<DirectionsResponse, AmapError>> + Send;

    /// Multi-leg public-transit search. Needs both endpoints' city context;
    /// an empty destination city defaults to the origin city.
    fn transit_directions(
        &self,
        origin: &str,
        destination: &str,
        city: &str,
        city_dest: &str,
    ) -> impl Future<Output = Result<DirectionsResponse, AmapError>> + Send;
}

impl DirectionsProvider for AmapClient {
    async fn directions(
        &self,
        mode: PathMode,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, AmapError> {
        AmapClient::directions(self, mode, origin, destination).await
    }

    async fn transit_directions(
        &self,
        origin: &str,
        destination: &str,
        city: &str,
        city_dest: &str,
    ) -> Result<DirectionsResponse, AmapError> {
        AmapClient::transit_directions(self, origin, destination, city, city_dest).await
    }
}

/// Routes one leg between two resolved points under a chosen mode.
#[derive(Debug, Clone)]
pub struct SegmentRouter<D> {
    provider: D,
    /// City used for transit search when neither endpoint reports one.
    default_city: String,
}

impl<D: DirectionsProvider> SegmentRouter<D> {
    pub fn new(provider: D, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }

    /// Obtain a normalized segment for one leg.
    ///
    /// Driving, walking and cycling hit the single-best-path endpoints;
    /// every other mode (transit, and the train/flight modes when no
    /// dedicated provider applies) goes through the transit search.
    /// Returns `Unavailable` when the provider returned no path or
    /// itinerary; a zero-distance segment is never fabricated.
    pub async fn route(
        &self,
        origin: &Point,
        destination: &Point,
        mode: TransportMode,
    ) -> Result<Segment, RouteError> {
        debug!(from = %origin.name, to = %destination.name, %mode, "routing leg");

        let segment = match mode {
            TransportMode::Driving => self.path_leg(origin, destination, PathMode::Driving, mode).await?,
            TransportMode::Walking => self.path_leg(origin, destination, PathMode::Walking, mode).await?,
            TransportMode::Cycling => self.path_leg(origin, destination, PathMode::Cycling, mode).await?,
            TransportMode::Transit | TransportMode::Train | TransportMode::Flight => {
                self.transit_leg(origin, destination).await?
            }
        };

        segment.ok_or_else(|| RouteError::Unavailable {
            from: origin.name.clone(),
            to: destination.name.clone(),
        })
    }

    async fn path_leg(
        &self,
        origin: &Point,
        destination: &Point,
        path_mode: PathMode,
        mode: TransportMode,
    ) -> Result<Option<Segment>, RouteError> {
        let response = self
            .provider
            .directions(path_mode, &origin.coords(), &destination.coords())
            .await
            .map_err(|e| RouteError::Provider(e.to_string()))?;

        Ok(normalize_path(origin, destination, mode.as_str(), &response))
    }

    async fn transit_leg(
        &self,
        origin: &Point,
        destination: &Point,
    ) -> Result<Option<Segment>, RouteError> {
        let city = if !origin.city.is_empty() {
            origin.city.as_str()
        } else if !destination.city.is_empty() {
            destination.city.as_str()
        } else {
            self.default_city.as_str()
        };
        let city_dest = if destination.city.is_empty() {
            city
        } else {
            destination.city.as_str()
        };

        let response = self
            .provider
            .transit_directions(&origin.coords(), &destination.coords(), city, city_dest)
            .await
            .map_err(|e| RouteError::Provider(e.to_string()))?;

        Ok(normalize_transit(origin, destination, &response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock provider that records transit city arguments and serves one
    /// canned response for everything.
    struct MockDirections {
        body: String,
        transit_cities: Mutex<Vec<(String, String)>>,
    }

    impl MockDirections {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                transit_cities: Mutex::new(Vec::new()),
            }
        }
    }

    impl DirectionsProvider for MockDirections {
        async fn directions(
            &self,
            _mode: PathMode,
            _origin: &str,
            _destination: &str,
        ) -> Result<DirectionsResponse, AmapError> {
            Ok(serde_json::from_str(&self.body).unwrap())
        }

        async fn transit_directions(
            &self,
            _origin: &str,
            _destination: &str,
            city: &str,
            city_dest: &str,
        ) -> Result<DirectionsResponse, AmapError> {
            self.transit_cities
                .lock()
                .unwrap()
                .push((city.to_string(), city_dest.to_string()));
            Ok(serde_json::from_str(&self.body).unwrap())
        }
    }

    fn point_in(name: &str, city: &str) -> Point {
        let mut p = Point::new(name, 39.9, 116.4);
        p.city = city.to_string();
        p
    }

    #[tokio::test]
    async fn driving_leg_normalizes_path() {
        let provider = MockDirections::new(
            r#"{"route": {"paths": [{"distance": "8000", "duration": "1200"}]}}"#,
        );
        let router = SegmentRouter::new(provider, "Beijing");

        let seg = router
            .route(
                &point_in("A", "Beijing"),
                &point_in("B", "Beijing"),
                TransportMode::Driving,
            )
            .await
            .unwrap();

        assert_eq!(seg.distance_km, 8.0);
        assert_eq!(seg.duration_minutes, 20.0);
        assert_eq!(seg.mode_label, "driving");
    }

    #[tokio::test]
    async fn empty_response_is_unavailable() {
        let provider = MockDirections::new(r#"{"route": {"paths": [], "transits": []}}"#);
        let router = SegmentRouter::new(provider, "Beijing");

        let result = router
            .route(
                &point_in("A", ""),
                &point_in("B", ""),
                TransportMode::Transit,
            )
            .await;

        assert!(matches!(result, Err(RouteError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn transit_city_defaults() {
        let provider = MockDirections::new(
            r#"{"route": {"transits": [{"duration": "600",
                "segments": [{"walking": {"distance": "400"}}]}]}}"#,
        );
        let router = SegmentRouter::new(provider, "Beijing");

        // Neither endpoint has a city: both fall back to the default.
        router
            .route(&point_in("A", ""), &point_in("B", ""), TransportMode::Transit)
            .await
            .unwrap();

        // Only the destination has a city: it supplies both sides' context.
        router
            .route(
                &point_in("A", ""),
                &point_in("B", "Shanghai"),
                TransportMode::Transit,
            )
            .await
            .unwrap();

        let calls = router.provider.transit_cities.lock().unwrap();
        assert_eq!(calls[0], ("Beijing".to_string(), "Beijing".to_string()));
        assert_eq!(calls[1], ("Shanghai".to_string(), "Shanghai".to_string()));
    }
}

//! Free-text place resolution.
//!
//! Turns a human-readable place name (plus an optional city hint) into a
//! coordinate point, using keyword POI search with a geocoding fallback for
//! candidates that come back without coordinates.

use tracing::{debug, warn};

use crate::amap::{AmapClient, AmapError, GeocodeResponse, PoiDto, PoiSearchResponse, parse_coord};
use crate::domain::{Point, RouteError};

/// How many POI candidates to request for a single resolution.
const RESOLVE_PAGE_SIZE: usize = 5;

/// How many POI candidates to request and return for disambiguation.
const SEARCH_PAGE_SIZE: usize = 10;
const SEARCH_MAX_RESULTS: usize = 8;

/// Errors from place resolution.
///
/// `NotFound` is non-fatal for batch callers: the item is dropped with a
/// warning. `Provider` means the search itself failed and is surfaced
/// separately so callers can log and continue.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The search produced no candidate with usable coordinates.
    #[error("no location found for '{0}'")]
    NotFound(String),

    /// The place-search provider call failed.
    #[error("place search failed: {0}")]
    Provider(#[from] AmapError),
}

impl From<GeoError> for RouteError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::NotFound(name) => RouteError::NotFound(name),
            GeoError::Provider(e) => RouteError::Provider(e.to_string()),
        }
    }
}

/// Trait for the place-search and geocoding provider.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait PlaceProvider {
    /// Keyword POI search, optionally scoped to a city.
    fn text_search(
        &self,
        keywords: &str,
        city: &str,
        page_size: usize,
    ) -> impl Future<Output = Result<PoiSearchResponse, AmapError>> + Send;

    /// Convert a text address to coordinates, optionally scoped to a city.
    fn geocode(
        &self,
        address: &str,
        city: &str,
    ) -> impl Future<Output = Result<GeocodeResponse, AmapError>> + Send;
}

impl PlaceProvider for AmapClient {
    async fn text_search(
        &self,
        keywords: &str,
        city: &str,
        page_size: usize,
    ) -> Result<PoiSearchResponse, AmapError> {
        AmapClient::text_search(self, keywords, city, page_size).await
    }

    async fn geocode(&self, address: &str, city: &str) -> Result<GeocodeResponse, AmapError> {
        AmapClient::geocode(self, address, city).await
    }
}

/// Resolves free-text place names to coordinate points.
#[derive(Debug, Clone)]
pub struct GeoResolver<P> {
    provider: P,
}

impl<P: PlaceProvider> GeoResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolve a place name to a point.
    ///
    /// Takes the top-ranked POI candidate. If it carries no coordinates but
    /// has an address, the address (with parenthetical qualifiers stripped)
    /// is geocoded against the candidate's reported city. A candidate with
    /// neither is `NotFound`.
    pub async fn resolve(&self, name: &str, city: &str) -> Result<Point, GeoError> {
        let response = self.provider.text_search(name, city, RESOLVE_PAGE_SIZE).await?;

        let Some(top) = response.pois.first() else {
            warn!(name, "no POI found");
            return Err(GeoError::NotFound(name.to_string()));
        };

        match self.candidate_point(top, name, city).await {
            Some(point) => Ok(point),
            None => Err(GeoError::NotFound(name.to_string())),
        }
    }

    /// Search for up to eight candidate points matching a query.
    ///
    /// Applies the same per-candidate coordinate pipeline as [`resolve`]
    /// without early exit; candidates that fail it are skipped.
    ///
    /// [`resolve`]: GeoResolver::resolve
    pub async fn search(&self, query: &str, city: &str) -> Result<Vec<Point>, GeoError> {
        let response = self
            .provider
            .text_search(query, city, SEARCH_PAGE_SIZE)
            .await?;

        let mut points = Vec::new();
        for poi in response.pois.iter().take(SEARCH_MAX_RESULTS) {
            if let Some(point) = self.candidate_point(poi, query, city).await {
                points.push(point);
            }
        }

        Ok(points)
    }

    /// Steps 2-3 of the resolution pipeline for one POI candidate.
    async fn candidate_point(&self, poi: &PoiDto, query: &str, city: &str) -> Option<Point> {
        let poi_city = if poi.cityname.is_empty() {
            city
        } else {
            &poi.cityname
        };

        let coord = match parse_coord(&poi.location) {
            Some(coord) => Some(coord),
            None if !poi.address.is_empty() => {
                let address = strip_parenthetical(&poi.address);
                debug!(name = %poi.name, %address, "POI has no coordinates, geocoding address");
                match self.provider.geocode(address, poi_city).await {
                    Ok(geo) => geo
                        .geocodes
                        .first()
                        .and_then(|g| parse_coord(&g.location)),
                    Err(e) => {
                        // Geocoding is best-effort; a failure here just
                        // means this candidate has no usable coordinates.
                        warn!(name = %poi.name, error = %e, "geocoding fallback failed");
                        None
                    }
                }
            }
            None => None,
        };

        let (lat, lng) = coord?;
        Some(Point {
            name: if poi.name.is_empty() {
                query.to_string()
            } else {
                poi.name.clone()
            },
            lat,
            lng,
            address: poi.address.clone(),
            city: poi_city.to_string(),
        })
    }
}

/// Drop a trailing parenthetical qualifier, ASCII or full-width.
fn strip_parenthetical(address: &str) -> &str {
    let cut = address
        .find('(')
        .into_iter()
        .chain(address.find('（'))
        .min()
        .unwrap_or(address.len());
    address[..cut].trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock provider serving canned POI and geocode responses.
    struct MockPlaces {
        pois: Vec<PoiDto>,
        geocode_location: Option<String>,
        geocode_calls: Mutex<usize>,
    }

    impl MockPlaces {
        fn new(pois: Vec<PoiDto>) -> Self {
            Self {
                pois,
                geocode_location: None,
                geocode_calls: Mutex::new(0),
            }
        }

        fn with_geocode(mut self, location: &str) -> Self {
            self.geocode_location = Some(location.to_string());
            self
        }
    }

    impl PlaceProvider for MockPlaces {
        async fn text_search(
            &self,
            _keywords: &str,
            _city: &str,
            _page_size: usize,
        ) -> Result<PoiSearchResponse, AmapError> {
            Ok(PoiSearchResponse {
                pois: self.pois.clone(),
            })
        }

        async fn geocode(&self, _address: &str, _city: &str) -> Result<GeocodeResponse, AmapError> {
            *self.geocode_calls.lock().unwrap() += 1;
            match &self.geocode_location {
                Some(loc) => Ok(GeocodeResponse {
                    geocodes: vec![crate::amap::GeocodeDto {
                        location: loc.clone(),
                    }],
                }),
                None => Ok(GeocodeResponse::default()),
            }
        }
    }

    fn poi(name: &str, location: &str, address: &str, city: &str) -> PoiDto {
        PoiDto {
            name: name.to_string(),
            location: location.to_string(),
            address: address.to_string(),
            cityname: city.to_string(),
        }
    }

    #[tokio::test]
    async fn resolve_uses_direct_coordinates() {
        let provider = MockPlaces::new(vec![poi("Forbidden City", "116.397,39.918", "", "Beijing")]);
        let resolver = GeoResolver::new(provider);

        let point = resolver.resolve("Forbidden City", "Beijing").await.unwrap();
        assert_eq!(point.name, "Forbidden City");
        assert_eq!(point.lat, 39.918);
        assert_eq!(point.lng, 116.397);
        assert_eq!(point.city, "Beijing");
    }

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let provider = MockPlaces::new(vec![poi("Forbidden City", "116.397,39.918", "", "Beijing")]);
        let resolver = GeoResolver::new(provider);

        let first = resolver.resolve("Forbidden City", "Beijing").await.unwrap();
        let second = resolver.resolve("Forbidden City", "Beijing").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn resolve_falls_back_to_geocoding() {
        let provider = MockPlaces::new(vec![poi(
            "Old Teahouse",
            "",
            "12 Hutong Lane (north gate)",
            "Beijing",
        )])
        .with_geocode("116.40,39.90");
        let resolver = GeoResolver::new(provider);

        let point = resolver.resolve("Old Teahouse", "").await.unwrap();
        assert_eq!((point.lat, point.lng), (39.90, 116.40));
        assert_eq!(*resolver.provider.geocode_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn resolve_without_coordinates_or_geocode_hit_is_not_found() {
        let provider =
            MockPlaces::new(vec![poi("Nowhere", "", "Unknown Road", "Beijing")]);
        let resolver = GeoResolver::new(provider);

        let result = resolver.resolve("Nowhere", "Beijing").await;
        assert!(matches!(result, Err(GeoError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolve_empty_search_is_not_found() {
        let resolver = GeoResolver::new(MockPlaces::new(vec![]));
        let result = resolver.resolve("Atlantis", "").await;
        assert!(matches!(result, Err(GeoError::NotFound(name)) if name == "Atlantis"));
    }

    #[tokio::test]
    async fn search_caps_results_and_skips_bad_candidates() {
        let mut pois: Vec<PoiDto> = (0..10)
            .map(|i| poi(&format!("P{i}"), &format!("116.{i},39.{i}"), "", "Beijing"))
            .collect();
        // A candidate with no coordinates and no address is skipped.
        pois.insert(0, poi("Broken", "", "", "Beijing"));

        let resolver = GeoResolver::new(MockPlaces::new(pois));
        let points = resolver.search("P", "Beijing").await.unwrap();

        // 8-candidate cap applies before the skip, leaving 7 usable.
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].name, "P0");
    }

    #[test]
    fn strip_parenthetical_variants() {
        assert_eq!(strip_parenthetical("Main St 5 (rear)"), "Main St 5");
        assert_eq!(strip_parenthetical("长安街1号（东门）"), "长安街1号");
        assert_eq!(strip_parenthetical("No brackets"), "No brackets");
    }
}

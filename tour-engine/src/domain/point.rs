//! Resolved places and distance helpers.

use serde::Serialize;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A resolved place: a name with coordinates.
///
/// Produced by the geo resolver from a provider response. Points have no
/// stable identity across calls; equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Display name as reported by the place-search provider.
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Street address, possibly empty.
    pub address: String,
    /// City the provider placed this point in, possibly empty.
    pub city: String,
}

impl Point {
    /// Create a point with empty address and city.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            address: String::new(),
            city: String::new(),
        }
    }

    /// Coordinates in the "lng,lat" order the map provider expects.
    pub fn coords(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Planar Euclidean distance in raw degree space.
///
/// Not a physical distance. Used only for comparing candidates during
/// greedy ordering, where intra-city scale makes the flat-earth
/// approximation acceptable.
pub fn planar_deg(a: &Point, b: &Point) -> f64 {
    let d_lat = a.lat - b.lat;
    let d_lng = a.lng - b.lng;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_are_lng_lat() {
        let p = Point::new("Somewhere", 39.9, 116.4);
        assert_eq!(p.coords(), "116.4,39.9");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = Point::new("A", 39.9, 116.4);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn haversine_beijing_shanghai() {
        // Beijing ~ Shanghai is roughly 1070 km as the crow flies.
        let beijing = Point::new("Beijing", 39.9042, 116.4074);
        let shanghai = Point::new("Shanghai", 31.2304, 121.4737);

        let d = haversine_km(&beijing, &shanghai);
        assert!((1000.0..1150.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Point::new("A", 39.9, 116.4);
        let b = Point::new("B", 31.2, 121.5);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn planar_distance() {
        let a = Point::new("A", 0.0, 0.0);
        let b = Point::new("B", 3.0, 4.0);
        assert!((planar_deg(&a, &b) - 5.0).abs() < 1e-12);
    }
}

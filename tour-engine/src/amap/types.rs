//! Wire DTOs for Amap responses.
//!
//! The V3/V5 APIs serialize numbers as strings and occasionally replace a
//! missing object with an empty string or empty array, so the numeric and
//! nested fields here deserialize leniently instead of assuming one shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Parse an Amap `"lng,lat"` location string into `(lat, lng)`.
pub fn parse_coord(location: &str) -> Option<(f64, f64)> {
    let (lng, lat) = location.split_once(',')?;
    let lng: f64 = lng.trim().parse().ok()?;
    let lat: f64 = lat.trim().parse().ok()?;
    Some((lat, lng))
}

/// Accept a number, a numeric string, or nothing.
fn de_flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept `T`, or silently drop a field whose shape does not match
/// (e.g. `"railway": []` where an object is documented).
fn de_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Accept a string, or a list of fragments to be joined.
/// Some POI records report `address` as an array.
fn de_joined_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Array(parts) => parts
            .into_iter()
            .filter_map(|p| match p {
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        _ => String::new(),
    })
}

/// Response from the V5 POI text search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiSearchResponse {
    #[serde(default)]
    pub pois: Vec<PoiDto>,
}

/// One POI candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiDto {
    #[serde(default)]
    pub name: String,
    /// `"lng,lat"`, possibly empty when the POI carries no coordinates.
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "de_joined_string")]
    pub address: String,
    #[serde(default)]
    pub cityname: String,
}

/// Response from the V3 geocoding endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub geocodes: Vec<GeocodeDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeDto {
    #[serde(default)]
    pub location: String,
}

/// Response from any of the direction endpoints.
///
/// V3 nests the payload under `route`, V4 (cycling) under `data`; the
/// transit endpoint fills `transits` instead of `paths`. One struct covers
/// all four so the router can dispatch on content rather than endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default, deserialize_with = "de_lenient")]
    pub route: Option<RouteData>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub data: Option<RouteData>,
}

impl DirectionsResponse {
    fn payload(&self) -> Option<&RouteData> {
        self.route.as_ref().or(self.data.as_ref())
    }

    pub fn paths(&self) -> &[PathDto] {
        self.payload().map(|r| r.paths.as_slice()).unwrap_or(&[])
    }

    pub fn transits(&self) -> &[TransitDto] {
        self.payload().map(|r| r.transits.as_slice()).unwrap_or(&[])
    }

    /// Top-level distance field of the payload, where present.
    pub fn route_distance(&self) -> Option<f64> {
        self.payload().and_then(|r| r.distance)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteData {
    #[serde(default)]
    pub paths: Vec<PathDto>,
    #[serde(default)]
    pub transits: Vec<TransitDto>,
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
}

/// A single-best path for driving, walking or cycling, in metres/seconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathDto {
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub steps: Vec<StepDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepDto {
    #[serde(default)]
    pub instruction: String,
}

/// One candidate transit itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitDto {
    /// Trustworthy end-to-end duration in seconds.
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub duration: Option<f64>,
    /// Walking distance only, not the full trip. See the segment router
    /// for the accumulation rule.
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub segments: Vec<TransitSegmentDto>,
}

/// One sub-leg of a transit itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitSegmentDto {
    #[serde(default, deserialize_with = "de_lenient")]
    pub walking: Option<WalkingDto>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub bus: Option<BusDto>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub railway: Option<RailwayDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalkingDto {
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusDto {
    /// Candidate lines for this hop; the first is taken.
    #[serde(default)]
    pub buslines: Vec<BuslineDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuslineDto {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub departure_stop: Option<StopDto>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub arrival_stop: Option<StopDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RailwayDto {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub departure_stop: Option<StopDto>,
    #[serde(default, deserialize_with = "de_lenient")]
    pub arrival_stop: Option<StopDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopDto {
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coord_lng_first() {
        assert_eq!(parse_coord("116.4,39.9"), Some((39.9, 116.4)));
        assert_eq!(parse_coord(" 116.4 , 39.9 "), Some((39.9, 116.4)));
        assert!(parse_coord("").is_none());
        assert!(parse_coord("not,numbers").is_none());
    }

    #[test]
    fn path_distance_accepts_string_or_number() {
        let from_string: PathDto = serde_json::from_str(r#"{"distance": "1234"}"#).unwrap();
        assert_eq!(from_string.distance, Some(1234.0));

        let from_number: PathDto = serde_json::from_str(r#"{"distance": 1234}"#).unwrap();
        assert_eq!(from_number.distance, Some(1234.0));

        let missing: PathDto = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.distance, None);
    }

    #[test]
    fn poi_address_accepts_list() {
        let poi: PoiDto =
            serde_json::from_str(r#"{"name": "x", "address": ["Main St", " 5"]}"#).unwrap();
        assert_eq!(poi.address, "Main St 5");
    }

    #[test]
    fn empty_array_railway_is_dropped() {
        let seg: TransitSegmentDto = serde_json::from_str(r#"{"railway": []}"#).unwrap();
        assert!(seg.railway.is_none());

        let seg: TransitSegmentDto =
            serde_json::from_str(r#"{"railway": {"name": "G-line"}}"#).unwrap();
        assert_eq!(seg.railway.unwrap().name, "G-line");
    }

    #[test]
    fn directions_response_prefers_route_over_data() {
        let v3: DirectionsResponse =
            serde_json::from_str(r#"{"route": {"paths": [{"distance": "10"}]}}"#).unwrap();
        assert_eq!(v3.paths().len(), 1);

        let v4: DirectionsResponse =
            serde_json::from_str(r#"{"data": {"paths": [{"distance": 20}]}}"#).unwrap();
        assert_eq!(v4.paths()[0].distance, Some(20.0));
    }

    #[test]
    fn transit_payload_parses() {
        let json = r#"{
            "route": {
                "distance": "900",
                "transits": [{
                    "duration": "1800",
                    "segments": [
                        {"walking": {"distance": "500"}},
                        {"bus": {"buslines": [{"name": "Line 2 (inner loop)", "distance": "3000"}]}}
                    ]
                }]
            }
        }"#;
        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.route_distance(), Some(900.0));
        let transit = &resp.transits()[0];
        assert_eq!(transit.duration, Some(1800.0));
        assert_eq!(transit.segments.len(), 2);
        assert_eq!(
            transit.segments[1].bus.as_ref().unwrap().buslines[0].name,
            "Line 2 (inner loop)"
        );
    }
}

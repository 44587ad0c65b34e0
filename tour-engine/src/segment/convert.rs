//! Conversion from direction payloads to normalized segments.
//!
//! These are pure functions over decoded DTOs so the reconciliation rules
//! can be tested without any HTTP in the loop.

use crate::amap::DirectionsResponse;
use crate::domain::{Point, Segment};

/// Normalize a single-best-path response (driving, walking, cycling).
///
/// Takes the first returned path. Distances arrive in metres and durations
/// in seconds. Returns `None` when the provider returned no path at all;
/// a zero-valued segment is never synthesized.
pub fn normalize_path(
    origin: &Point,
    destination: &Point,
    mode_label: &str,
    response: &DirectionsResponse,
) -> Option<Segment> {
    let path = response.paths().first()?;

    let steps = path
        .steps
        .iter()
        .filter(|s| !s.instruction.is_empty())
        .map(|s| s.instruction.clone())
        .collect();

    Some(Segment {
        origin: origin.clone(),
        destination: destination.clone(),
        distance_km: path.distance.unwrap_or(0.0) / 1000.0,
        duration_minutes: path.duration.unwrap_or(0.0) / 60.0,
        mode_label: mode_label.to_string(),
        steps,
    })
}

/// Normalize a transit response.
///
/// Takes the first returned itinerary. The itinerary's own `distance`
/// field covers walking distance only, so the true trip distance is the
/// sum of every sub-leg's distance (walking + bus + rail); the top-level
/// field is used only when no sub-leg reports a distance. The top-level
/// duration is trustworthy and used as-is.
pub fn normalize_transit(
    origin: &Point,
    destination: &Point,
    response: &DirectionsResponse,
) -> Option<Segment> {
    let transit = response.transits().first()?;

    let mut sub_leg_metres: Option<f64> = None;
    let mut add = |d: Option<f64>| {
        if let Some(d) = d {
            *sub_leg_metres.get_or_insert(0.0) += d;
        }
    };

    let mut lines: Vec<String> = Vec::new();
    let mut steps: Vec<String> = Vec::new();

    for seg in &transit.segments {
        if let Some(walking) = &seg.walking {
            if let Some(d) = walking.distance {
                if d > 0.0 {
                    steps.push(format!("Walk {d:.0} m"));
                }
            }
            add(walking.distance);
        }

        if let Some(bus) = &seg.bus {
            // Several candidate lines may serve this hop; take the first.
            if let Some(line) = bus.buslines.first() {
                let name = simplify_line_name(&line.name);
                if !name.is_empty() && !lines.iter().any(|l| l.as_str() == name) {
                    lines.push(name.to_string());
                }
                steps.push(boarding_step(
                    name,
                    line.departure_stop.as_ref().map(|s| s.name.as_str()),
                    line.arrival_stop.as_ref().map(|s| s.name.as_str()),
                ));
                add(line.distance);
            }
        } else if let Some(railway) = &seg.railway {
            if !railway.name.is_empty() {
                let name = simplify_line_name(&railway.name);
                if !lines.iter().any(|l| l.as_str() == name) {
                    lines.push(name.to_string());
                }
                steps.push(boarding_step(
                    name,
                    railway.departure_stop.as_ref().map(|s| s.name.as_str()),
                    railway.arrival_stop.as_ref().map(|s| s.name.as_str()),
                ));
                add(railway.distance);
            }
        }
    }

    let metres = sub_leg_metres
        .or(transit.distance)
        .or_else(|| response.route_distance())
        .unwrap_or(0.0);

    let mode_label = if lines.is_empty() {
        "Transit".to_string()
    } else {
        lines.join(" + ")
    };

    Some(Segment {
        origin: origin.clone(),
        destination: destination.clone(),
        distance_km: metres / 1000.0,
        duration_minutes: transit.duration.unwrap_or(0.0) / 60.0,
        mode_label,
        steps,
    })
}

/// Strip the parenthetical direction suffix from a line name,
/// e.g. "Line 2 (inner loop)" -> "Line 2".
fn simplify_line_name(name: &str) -> &str {
    let cut = name
        .find('(')
        .into_iter()
        .chain(name.find('（'))
        .min()
        .unwrap_or(name.len());
    name[..cut].trim()
}

fn boarding_step(line: &str, from: Option<&str>, to: Option<&str>) -> String {
    format!(
        "Take {line} ({} -> {})",
        from.filter(|s| !s.is_empty()).unwrap_or("origin"),
        to.filter(|s| !s.is_empty()).unwrap_or("destination"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> (Point, Point) {
        (Point::new("A", 39.9, 116.3), Point::new("B", 39.95, 116.4))
    }

    fn transit_json(body: &str) -> DirectionsResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn path_normalization() {
        let (a, b) = points();
        let resp = transit_json(
            r#"{"route": {"paths": [{
                "distance": "12500",
                "duration": "1500",
                "steps": [{"instruction": "Head north"}, {"instruction": ""}]
            }]}}"#,
        );

        let seg = normalize_path(&a, &b, "driving", &resp).unwrap();
        assert_eq!(seg.distance_km, 12.5);
        assert_eq!(seg.duration_minutes, 25.0);
        assert_eq!(seg.mode_label, "driving");
        assert_eq!(seg.steps, vec!["Head north".to_string()]);
        assert_eq!(seg.origin, a);
        assert_eq!(seg.destination, b);
    }

    #[test]
    fn empty_paths_yield_none() {
        let (a, b) = points();
        let resp = transit_json(r#"{"route": {"paths": [], "transits": []}}"#);
        assert!(normalize_path(&a, &b, "driving", &resp).is_none());
        assert!(normalize_transit(&a, &b, &resp).is_none());
    }

    #[test]
    fn transit_distance_sums_sub_legs() {
        // The top-level distance (500 m, walking only) must be ignored in
        // favour of the sub-leg sum: 500 + 3000 + 1200 = 4700 m.
        let (a, b) = points();
        let resp = transit_json(
            r#"{"route": {"distance": "500", "transits": [{
                "duration": "2400",
                "distance": "500",
                "segments": [
                    {"walking": {"distance": "500"}},
                    {"bus": {"buslines": [{"name": "A", "distance": "3000"}]}},
                    {"bus": {"buslines": [{"name": "A", "distance": "1200"}]}}
                ]
            }]}}"#,
        );

        let seg = normalize_transit(&a, &b, &resp).unwrap();
        assert!((seg.distance_km - 4.7).abs() < 1e-9);
        assert_eq!(seg.duration_minutes, 40.0);
        assert_eq!(seg.mode_label, "A");
    }

    #[test]
    fn transit_falls_back_to_top_level_distance() {
        let (a, b) = points();
        let resp = transit_json(
            r#"{"route": {"transits": [{
                "duration": "600",
                "distance": "2200",
                "segments": [{"bus": {"buslines": [{"name": "Line 9"}]}}]
            }]}}"#,
        );

        let seg = normalize_transit(&a, &b, &resp).unwrap();
        assert!((seg.distance_km - 2.2).abs() < 1e-9);
        assert_eq!(seg.mode_label, "Line 9");
    }

    #[test]
    fn transit_label_dedupes_in_first_appearance_order() {
        let (a, b) = points();
        let resp = transit_json(
            r#"{"route": {"transits": [{
                "duration": "3600",
                "segments": [
                    {"bus": {"buslines": [{"name": "Line 2 (inner loop)", "distance": "2000"}]}},
                    {"railway": {"name": "Airport Express", "distance": "18000",
                                 "departure_stop": {"name": "Dongzhimen"},
                                 "arrival_stop": {"name": "Terminal 3"}}},
                    {"bus": {"buslines": [{"name": "Line 2 (outer loop)", "distance": "1000"}]}}
                ]
            }]}}"#,
        );

        let seg = normalize_transit(&a, &b, &resp).unwrap();
        assert_eq!(seg.mode_label, "Line 2 + Airport Express");
        assert!(seg.steps.iter().any(|s| s.contains("Dongzhimen -> Terminal 3")));
        assert!((seg.distance_km - 21.0).abs() < 1e-9);
    }

    #[test]
    fn transit_without_named_lines_is_generic() {
        let (a, b) = points();
        let resp = transit_json(
            r#"{"route": {"transits": [{
                "duration": "300",
                "segments": [{"walking": {"distance": "400"}}]
            }]}}"#,
        );

        let seg = normalize_transit(&a, &b, &resp).unwrap();
        assert_eq!(seg.mode_label, "Transit");
        assert_eq!(seg.steps, vec!["Walk 400 m".to_string()]);
    }
}

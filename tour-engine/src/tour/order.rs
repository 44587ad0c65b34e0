//! Greedy nearest-neighbour tour ordering.

use crate::domain::{Point, planar_deg};

/// Order points by repeatedly visiting the nearest unvisited one.
///
/// The first element of the input is fixed as the start of the path.
/// Distances are planar Euclidean in raw degree space, deliberately not
/// great-circle: at intra-city scale the flat approximation is fine and
/// avoids trig in the inner loop. No refinement pass (2-opt or similar)
/// is applied, so the result is known-suboptimal for larger point sets.
pub fn greedy_order(mut remaining: Vec<Point>) -> Vec<Point> {
    if remaining.is_empty() {
        return remaining;
    }

    let mut path = Vec::with_capacity(remaining.len());
    path.push(remaining.remove(0));

    while !remaining.is_empty() {
        let tail = &path[path.len() - 1];

        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let d = planar_deg(tail, candidate);
            if d < best_dist {
                best_dist = d;
                best_idx = i;
            }
        }

        let next = remaining.remove(best_idx);
        path.push(next);
    }

    path
}

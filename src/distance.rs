//! Distance ordering of sibling areas around a reference point.

use geo::{Distance, Haversine, Point};
use tracing::debug;

use crate::models::Area;

/// Great-circle distance in metres between two points (x = lon, y = lat)
pub fn great_circle_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine.distance(a, b)
}

/// Reorder `nodes` by ascending great-circle distance from (`lat`, `lon`).
///
/// The sort is stable: equal distances keep their source order. Nodes
/// without a coordinate go last, also in source order.
pub fn distance_sort(nodes: Vec<Area>, lat: f64, lon: f64) -> Vec<Area> {
    let origin = Point::new(lon, lat);

    let mut keyed: Vec<(f64, Area)> = nodes
        .into_iter()
        .map(|area| {
            let d = area
                .location()
                .map(|p| great_circle_distance(origin, p))
                .unwrap_or(f64::INFINITY);
            (d, area)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(
        "Sorted {} areas around ({}, {}), nearest: {:?}",
        keyed.len(),
        lat,
        lon,
        keyed.first().map(|(_, a)| a.name.as_str())
    );

    keyed.into_iter().map(|(_, area)| area).collect()
}

//! Normalization of raw provider responses into canonical route plans.

use crate::{
    entities::{RoutePlan, Step},
    error::{no_path_found_error, provider_error, Error},
    external::amap::{DrivingResponse, RawPath},
    geometry,
};

/// Turn a raw driving response into a canonical plan.
///
/// Fails when the provider signals a non-success status, or when it reports
/// success with an empty path list (unreachable origin/destination pairs
/// show up this way). Only the first candidate path is considered.
pub fn normalize(response: DrivingResponse, waypoint_count: usize) -> Result<RoutePlan, Error> {
    if response.status != "1" {
        return Err(provider_error(
            response.infocode.as_deref().unwrap_or("unknown"),
            response.info.as_deref().unwrap_or("unknown"),
        ));
    }

    let route = response.route.ok_or_else(no_path_found_error)?;
    let path = route.paths.into_iter().next().ok_or_else(no_path_found_error)?;

    let polyline = aggregate_polyline(&path);
    let points = geometry::decode(&polyline);
    let bounds = geometry::compute_bounds(&polyline);

    let steps = path
        .steps
        .iter()
        .map(|step| Step {
            instruction: strip_tags(&step.instruction),
            distance: to_kilometers(&step.distance),
            duration: to_minutes(&step.duration),
            road: step.road.clone(),
            orientation: step.orientation.clone(),
        })
        .collect();

    Ok(RoutePlan {
        distance: to_kilometers(&path.distance),
        duration: to_minutes(&path.duration),
        tolls: parse_or_zero(&path.tolls),
        traffic_lights: parse_or_zero(&path.traffic_lights) as i64,
        waypoint_count,
        steps,
        path: points,
        bounds,
    })
}

/// Path-level geometry wins; otherwise the per-step fragments are stitched
/// back together, skipping steps that carry none.
fn aggregate_polyline(path: &RawPath) -> String {
    if let Some(polyline) = &path.polyline {
        if !polyline.is_empty() {
            return polyline.clone();
        }
    }

    path.steps
        .iter()
        .filter_map(|step| step.polyline.as_deref())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

/// Meters to kilometers, one decimal place.
fn to_kilometers(meters: &str) -> f64 {
    (parse_or_zero(meters) / 1000.0 * 10.0).round() / 10.0
}

/// Seconds to whole minutes, rounded up so a 61-second leg reports 2.
fn to_minutes(seconds: &str) -> i64 {
    (parse_or_zero(seconds) / 60.0).ceil() as i64
}

fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

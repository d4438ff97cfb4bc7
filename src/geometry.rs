//! Decoding of the provider's compressed path strings.
//!
//! The provider serializes a path as `lng,lat;lng,lat;...`. Decoding is
//! best-effort metadata extraction: points that do not parse as exactly two
//! finite numbers are skipped, and empty input yields an empty sequence
//! rather than an error.

use crate::entities::{BoundingBox, Coordinates};

/// Decode a compressed path string into an ordered coordinate sequence.
pub fn decode(path: &str) -> Vec<Coordinates> {
    path.split(';').filter_map(parse_point).collect()
}

/// Componentwise min/max extent of the decoded path, or `None` when no
/// point survives decoding. A single point collapses the box onto itself.
pub fn compute_bounds(path: &str) -> Option<BoundingBox> {
    let points = decode(path);
    let first = points.first()?;

    let mut southwest = first.clone();
    let mut northeast = first.clone();

    for point in &points[1..] {
        southwest.longitude = southwest.longitude.min(point.longitude);
        southwest.latitude = southwest.latitude.min(point.latitude);
        northeast.longitude = northeast.longitude.max(point.longitude);
        northeast.latitude = northeast.latitude.max(point.latitude);
    }

    Some(BoundingBox {
        southwest,
        northeast,
    })
}

fn parse_point(chunk: &str) -> Option<Coordinates> {
    let mut parts = chunk.split(',');

    let longitude = parse_finite(parts.next()?)?;
    let latitude = parse_finite(parts.next()?)?;

    // a third component means the point is malformed
    if parts.next().is_some() {
        return None;
    }

    Some(Coordinates {
        longitude,
        latitude,
    })
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

use serde::{Deserialize, Serialize};

use crate::entities::{BoundingBox, Coordinates};

/// Canonical route produced by the planner from a raw provider response.
///
/// Distances are kilometers rounded to one decimal, durations are whole
/// minutes rounded up.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutePlan {
    pub distance: f64,
    pub duration: i64,
    pub tolls: f64,
    pub traffic_lights: i64,
    pub waypoint_count: usize,
    pub steps: Vec<Step>,
    pub path: Vec<Coordinates>,
    pub bounds: Option<BoundingBox>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub distance: f64,
    pub duration: i64,
    pub road: String,
    pub orientation: String,
}

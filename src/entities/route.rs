use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entities::{Coordinates, Step};
use crate::error::Error;

/// A persisted, user-named route with planner output and survey annotations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub route_type: String,
    pub city: Option<String>,
    pub district: Option<String>,
    pub district_type: String,
    pub start_longitude: f64,
    pub start_latitude: f64,
    pub end_longitude: f64,
    pub end_latitude: f64,
    pub waypoints: Vec<Coordinates>,
    pub intersections: i64,
    pub right_turns: i64,
    pub left_turns: i64,
    pub u_turns: i64,
    pub roundabouts: i64,
    pub special_traffic_lights: i64,
    pub special_intersections: i64,
    pub distance: f64,
    pub duration: i64,
    pub polyline: Vec<Coordinates>,
    pub steps: Vec<Step>,
    pub tolls: f64,
    pub traffic_lights: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `routes` row. The JSON text columns are deserialized by the
/// `TryFrom<RouteRow>` conversion below.
#[derive(Debug, FromRow)]
pub struct RouteRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub route_type: String,
    pub city: Option<String>,
    pub district: Option<String>,
    pub district_type: String,
    pub start_longitude: f64,
    pub start_latitude: f64,
    pub end_longitude: f64,
    pub end_latitude: f64,
    pub waypoints: String,
    pub intersections: i64,
    pub right_turns: i64,
    pub left_turns: i64,
    pub u_turns: i64,
    pub roundabouts: i64,
    pub special_traffic_lights: i64,
    pub special_intersections: i64,
    pub distance: f64,
    pub duration: i64,
    pub polyline: String,
    pub steps: String,
    pub tolls: f64,
    pub traffic_lights: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RouteRow> for Route {
    type Error = Error;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        let waypoints: Vec<Coordinates> = serde_json::from_str(&row.waypoints)?;
        let polyline: Vec<Coordinates> = serde_json::from_str(&row.polyline)?;
        let steps: Vec<Step> = serde_json::from_str(&row.steps)?;

        Ok(Route {
            id: row.id,
            name: row.name,
            description: row.description,
            route_type: row.route_type,
            city: row.city,
            district: row.district,
            district_type: row.district_type,
            start_longitude: row.start_longitude,
            start_latitude: row.start_latitude,
            end_longitude: row.end_longitude,
            end_latitude: row.end_latitude,
            waypoints,
            intersections: row.intersections,
            right_turns: row.right_turns,
            left_turns: row.left_turns,
            u_turns: row.u_turns,
            roundabouts: row.roundabouts,
            special_traffic_lights: row.special_traffic_lights,
            special_intersections: row.special_intersections,
            distance: row.distance,
            duration: row.duration,
            polyline,
            steps,
            tolls: row.tolls,
            traffic_lights: row.traffic_lights,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Creation payload. Everything is optional at the boundary; the store
/// rejects with a validation error naming the required fields that are
/// missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRoute {
    pub name: Option<String>,
    pub description: Option<String>,
    pub route_type: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub district_type: Option<String>,
    pub start_longitude: Option<f64>,
    pub start_latitude: Option<f64>,
    pub end_longitude: Option<f64>,
    pub end_latitude: Option<f64>,
    pub waypoints: Option<Vec<Coordinates>>,
    pub intersections: Option<i64>,
    pub right_turns: Option<i64>,
    pub left_turns: Option<i64>,
    pub u_turns: Option<i64>,
    pub roundabouts: Option<i64>,
    pub special_traffic_lights: Option<i64>,
    pub special_intersections: Option<i64>,
    pub distance: Option<f64>,
    pub duration: Option<i64>,
    pub polyline: Option<Vec<Coordinates>>,
    pub steps: Option<Vec<Step>>,
    pub tolls: Option<f64>,
    pub traffic_lights: Option<i64>,
    pub created_by: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RouteFilter {
    pub page: i64,
    pub page_size: i64,
    pub route_type: Option<String>,
    pub name_contains: Option<String>,
}

impl Default for RouteFilter {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            route_type: None,
            name_contains: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchPage {
    pub routes: Vec<Route>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Clone, Debug, FromRow, Serialize)]
pub struct RouteTypeStats {
    pub route_type: String,
    pub count: i64,
    pub total_distance: f64,
    pub avg_distance: f64,
}

/// Outcome of an update or delete. A missing id is not an error; it shows
/// up here as zero affected rows.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateReceipt {
    pub id: i64,
    pub rows_affected: u64,
}

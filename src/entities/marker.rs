use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A point of interest pinned to a route. Markers never outlive their
/// parent route; the store cascades deletion.
#[derive(Clone, Debug, FromRow, Serialize, Deserialize)]
pub struct Marker {
    pub id: i64,
    pub route_id: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
    pub marker_type: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub contact: Option<String>,
    pub importance: i64,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMarker {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub name: Option<String>,
    pub marker_type: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub contact: Option<String>,
    pub importance: Option<i64>,
    pub category: Option<String>,
}

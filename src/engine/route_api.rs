use super::{helpers, Engine};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    api::RouteAPI,
    entities::{NewRoute, Route, RouteFilter, RouteRow, RouteTypeStats, UpdateReceipt},
    error::{not_found_error, validation_error, Error},
};

/// Columns a sparse update may touch. Identity, coordinates, planner output
/// and timestamps stay immutable through this path.
const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "description",
    "route_type",
    "city",
    "district",
    "district_type",
    "intersections",
    "right_turns",
    "left_turns",
    "u_turns",
    "roundabouts",
    "special_traffic_lights",
    "special_intersections",
];

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self, new_route))]
    async fn create_route(&self, new_route: NewRoute) -> Result<Route, Error> {
        let mut missing = Vec::new();

        if new_route.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if new_route.waypoints.is_none() {
            missing.push("waypoints");
        }
        if new_route.start_longitude.is_none() {
            missing.push("start_longitude");
        }
        if new_route.end_longitude.is_none() {
            missing.push("end_longitude");
        }

        if !missing.is_empty() {
            return Err(validation_error(&missing));
        }

        let waypoints = serde_json::to_string(&new_route.waypoints.unwrap_or_default())?;
        let polyline = serde_json::to_string(&new_route.polyline.unwrap_or_default())?;
        let steps = serde_json::to_string(&new_route.steps.unwrap_or_default())?;
        let now = chrono::Utc::now();

        let result = sqlx::query(
            "INSERT INTO routes (
                name, description, route_type, city, district, district_type,
                start_longitude, start_latitude, end_longitude, end_latitude,
                waypoints, intersections, right_turns, left_turns, u_turns,
                roundabouts, special_traffic_lights, special_intersections,
                distance, duration, polyline, steps, tolls, traffic_lights,
                created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new_route.name.unwrap_or_default())
        .bind(new_route.description)
        .bind(new_route.route_type.unwrap_or_else(|| "driving".into()))
        .bind(new_route.city)
        .bind(new_route.district)
        .bind(new_route.district_type.unwrap_or_else(|| "区".into()))
        .bind(new_route.start_longitude.unwrap_or_default())
        .bind(new_route.start_latitude.unwrap_or_default())
        .bind(new_route.end_longitude.unwrap_or_default())
        .bind(new_route.end_latitude.unwrap_or_default())
        .bind(waypoints)
        .bind(new_route.intersections.unwrap_or_default())
        .bind(new_route.right_turns.unwrap_or_default())
        .bind(new_route.left_turns.unwrap_or_default())
        .bind(new_route.u_turns.unwrap_or_default())
        .bind(new_route.roundabouts.unwrap_or_default())
        .bind(new_route.special_traffic_lights.unwrap_or_default())
        .bind(new_route.special_intersections.unwrap_or_default())
        .bind(new_route.distance.unwrap_or_default())
        .bind(new_route.duration.unwrap_or_default())
        .bind(polyline)
        .bind(steps)
        .bind(new_route.tolls.unwrap_or_default())
        .bind(new_route.traffic_lights.unwrap_or_default())
        .bind(new_route.created_by.unwrap_or_else(|| "system".into()))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_route(result.last_insert_rowid()).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, id: i64) -> Result<Route, Error> {
        let row = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found_error)?;

        row.try_into()
    }

    #[tracing::instrument(skip(self))]
    async fn list_routes(&self, filter: RouteFilter) -> Result<Vec<Route>, Error> {
        let page = filter.page.max(1);
        let page_size = filter.page_size.clamp(1, 100);

        let mut clauses: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(route_type) = filter.route_type {
            clauses.push("route_type = ?");
            binds.push(route_type);
        }
        if let Some(fragment) = filter.name_contains {
            clauses.push("name LIKE ?");
            binds.push(format!("%{}%", fragment));
        }

        let predicate = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM routes {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            predicate
        );

        let mut query = sqlx::query_as::<_, RouteRow>(&sql);
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Route::try_from).collect()
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_route(
        &self,
        id: i64,
        fields: Map<String, Value>,
    ) -> Result<UpdateReceipt, Error> {
        let rows_affected =
            helpers::apply_sparse_update(&self.pool, "routes", UPDATABLE_FIELDS, id, &fields, true)
                .await?;

        Ok(UpdateReceipt { id, rows_affected })
    }

    #[tracing::instrument(skip(self))]
    async fn delete_route(&self, id: i64) -> Result<UpdateReceipt, Error> {
        let result = sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(UpdateReceipt {
            id,
            rows_affected: result.rows_affected(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn route_statistics(&self) -> Result<Vec<RouteTypeStats>, Error> {
        let stats = sqlx::query_as::<_, RouteTypeStats>(
            "SELECT
                route_type,
                COUNT(*) AS count,
                SUM(distance) AS total_distance,
                AVG(distance) AS avg_distance
            FROM routes
            GROUP BY route_type
            ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }
}

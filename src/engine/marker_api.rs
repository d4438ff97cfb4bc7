use super::{helpers, Engine};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    api::MarkerAPI,
    entities::{Marker, NewMarker, UpdateReceipt},
    error::{not_found_error, validation_error, Error},
};

const UPDATABLE_FIELDS: &[&str] = &[
    "name",
    "description",
    "image_url",
    "contact",
    "importance",
    "category",
    "marker_type",
];

#[async_trait]
impl MarkerAPI for Engine {
    #[tracing::instrument(skip(self, new_marker))]
    async fn create_marker(&self, route_id: i64, new_marker: NewMarker) -> Result<Marker, Error> {
        let mut missing = Vec::new();

        if new_marker.longitude.is_none() {
            missing.push("longitude");
        }
        if new_marker.latitude.is_none() {
            missing.push("latitude");
        }
        if new_marker.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }

        if !missing.is_empty() {
            return Err(validation_error(&missing));
        }

        // markers cannot exist without a parent route
        sqlx::query("SELECT id FROM routes WHERE id = ?")
            .bind(route_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found_error)?;

        let result = sqlx::query(
            "INSERT INTO route_markers (
                route_id, longitude, latitude, name, marker_type,
                description, image_url, contact, importance, category, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(route_id)
        .bind(new_marker.longitude.unwrap_or_default())
        .bind(new_marker.latitude.unwrap_or_default())
        .bind(new_marker.name.unwrap_or_default())
        .bind(new_marker.marker_type.unwrap_or_else(|| "important".into()))
        .bind(new_marker.description)
        .bind(new_marker.image_url)
        .bind(new_marker.contact)
        .bind(new_marker.importance.unwrap_or(1))
        .bind(new_marker.category.unwrap_or_else(|| "other".into()))
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?;

        let marker =
            sqlx::query_as::<_, Marker>("SELECT * FROM route_markers WHERE id = ?")
                .bind(result.last_insert_rowid())
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(not_found_error)?;

        Ok(marker)
    }

    #[tracing::instrument(skip(self))]
    async fn list_markers(&self, route_id: i64) -> Result<Vec<Marker>, Error> {
        let markers = sqlx::query_as::<_, Marker>(
            "SELECT * FROM route_markers
             WHERE route_id = ?
             ORDER BY importance DESC, created_at DESC, id DESC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(markers)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_marker(
        &self,
        id: i64,
        fields: Map<String, Value>,
    ) -> Result<UpdateReceipt, Error> {
        let rows_affected = helpers::apply_sparse_update(
            &self.pool,
            "route_markers",
            UPDATABLE_FIELDS,
            id,
            &fields,
            false,
        )
        .await?;

        Ok(UpdateReceipt { id, rows_affected })
    }

    #[tracing::instrument(skip(self))]
    async fn delete_marker(&self, id: i64) -> Result<UpdateReceipt, Error> {
        let result = sqlx::query("DELETE FROM route_markers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(UpdateReceipt {
            id,
            rows_affected: result.rows_affected(),
        })
    }
}

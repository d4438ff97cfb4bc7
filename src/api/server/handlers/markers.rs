use axum::extract::{Extension, Json, Path};
use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::{
    api::interface::DynAPI,
    auth,
    entities::{Marker, NewMarker, UpdateReceipt},
    error::Error,
};

pub async fn create(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Path(route_id): Path<i64>,
    Json(params): Json<NewMarker>,
) -> Result<Json<Marker>, Error> {
    auth::require_admin(&headers)?;

    let marker = api.create_marker(route_id, params).await?;

    Ok(marker.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(route_id): Path<i64>,
) -> Result<Json<Vec<Marker>>, Error> {
    let markers = api.list_markers(route_id).await?;

    Ok(markers.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<UpdateReceipt>, Error> {
    auth::require_admin(&headers)?;

    let receipt = api.update_marker(id, fields).await?;

    Ok(receipt.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<UpdateReceipt>, Error> {
    auth::require_admin(&headers)?;

    let receipt = api.delete_marker(id).await?;

    Ok(receipt.into())
}

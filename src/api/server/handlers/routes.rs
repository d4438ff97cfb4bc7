use axum::extract::{Extension, Json, Path, Query};
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    api::interface::DynAPI,
    auth,
    entities::{NewRoute, Route, RouteFilter, RouteTypeStats, UpdateReceipt},
    error::Error,
};

/// Paged listing. `count` is the row count of this page only; callers that
/// need the filtered total go through search or statistics.
#[derive(Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub routes: Vec<Route>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Json(params): Json<NewRoute>,
) -> Result<Json<Route>, Error> {
    auth::require_admin(&headers)?;

    let route = api.create_route(params).await?;

    Ok(route.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<i64>,
) -> Result<Json<Route>, Error> {
    let route = api.find_route(id).await?;

    Ok(route.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(filter): Query<RouteFilter>,
) -> Result<Json<ListResponse>, Error> {
    let routes = api.list_routes(filter).await?;

    Ok(ListResponse {
        count: routes.len(),
        routes,
    }
    .into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<UpdateReceipt>, Error> {
    auth::require_admin(&headers)?;

    let receipt = api.update_route(id, fields).await?;

    Ok(receipt.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<UpdateReceipt>, Error> {
    auth::require_admin(&headers)?;

    let receipt = api.delete_route(id).await?;

    Ok(receipt.into())
}

pub async fn statistics(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<RouteTypeStats>>, Error> {
    let stats = api.route_statistics().await?;

    Ok(stats.into())
}

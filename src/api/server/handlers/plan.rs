use axum::extract::{Extension, Json};
use serde::Deserialize;

use crate::{
    api::interface::DynAPI,
    entities::{Coordinates, RoutePlan},
    error::Error,
    external::amap::Strategy,
};

#[derive(Deserialize)]
pub struct PlanRouteParams {
    origin: Coordinates,
    destination: Coordinates,
    #[serde(default)]
    waypoints: Vec<Coordinates>,
    #[serde(default)]
    strategy: i64,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PlanRouteParams>,
) -> Result<Json<RoutePlan>, Error> {
    let strategy = Strategy::try_from(params.strategy)?;

    let plan = api
        .plan_route(
            params.origin,
            params.destination,
            params.waypoints,
            strategy,
        )
        .await?;

    Ok(plan.into())
}

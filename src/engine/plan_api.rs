use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlannerAPI,
    entities::{Coordinates, RoutePlan},
    error::Error,
    external::amap::{self, Strategy},
    planner,
};

#[async_trait]
impl PlannerAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        waypoints: Vec<Coordinates>,
        strategy: Strategy,
    ) -> Result<RoutePlan, Error> {
        let response = amap::compute_route(&origin, &destination, &waypoints, strategy).await?;

        planner::normalize(response, waypoints.len())
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::entities::{
    Coordinates, Marker, NewMarker, NewRoute, Route, RouteFilter, RoutePlan, RouteTypeStats,
    SearchPage, SearchQuery, UpdateReceipt,
};
use crate::error::Error;
use crate::external::amap::Strategy;

#[async_trait]
pub trait PlannerAPI {
    async fn plan_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        waypoints: Vec<Coordinates>,
        strategy: Strategy,
    ) -> Result<RoutePlan, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn create_route(&self, new_route: NewRoute) -> Result<Route, Error>;
    async fn find_route(&self, id: i64) -> Result<Route, Error>;
    async fn list_routes(&self, filter: RouteFilter) -> Result<Vec<Route>, Error>;
    async fn update_route(&self, id: i64, fields: Map<String, Value>)
        -> Result<UpdateReceipt, Error>;
    async fn delete_route(&self, id: i64) -> Result<UpdateReceipt, Error>;
    async fn route_statistics(&self) -> Result<Vec<RouteTypeStats>, Error>;
}

#[async_trait]
pub trait MarkerAPI {
    async fn create_marker(&self, route_id: i64, new_marker: NewMarker) -> Result<Marker, Error>;
    async fn list_markers(&self, route_id: i64) -> Result<Vec<Marker>, Error>;
    async fn update_marker(
        &self,
        id: i64,
        fields: Map<String, Value>,
    ) -> Result<UpdateReceipt, Error>;
    async fn delete_marker(&self, id: i64) -> Result<UpdateReceipt, Error>;
}

#[async_trait]
pub trait SearchAPI {
    async fn search_routes(&self, query: SearchQuery) -> Result<SearchPage, Error>;
}

pub trait API: PlannerAPI + RouteAPI + MarkerAPI + SearchAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

mod location;
mod marker;
mod plan;
mod route;

pub use location::{BoundingBox, Coordinates};
pub use marker::{Marker, NewMarker};
pub use plan::{RoutePlan, Step};
pub use route::{
    NewRoute, Route, RouteFilter, RouteRow, RouteTypeStats, SearchPage, SearchQuery, UpdateReceipt,
};

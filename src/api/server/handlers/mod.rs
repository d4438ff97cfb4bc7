pub mod markers;
pub mod plan;
pub mod routes;
pub mod search;

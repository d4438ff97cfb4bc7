pub mod interface;
pub mod server;

pub use interface::{DynAPI, MarkerAPI, PlannerAPI, RouteAPI, SearchAPI, API};
pub use server::serve;

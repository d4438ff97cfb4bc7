mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{delete, get, post, put},
    Router,
};

use crate::api::server::handlers::{markers, plan, routes, search};
use crate::api::{interface::DynAPI, API};

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/", get(root))
        .route("/plan", post(plan::create))
        .route("/routes", get(routes::list).post(routes::create))
        .route("/routes/search", get(search::search))
        .route("/routes/statistics", get(routes::statistics))
        .route(
            "/routes/:id",
            get(routes::find).put(routes::update).delete(routes::remove),
        )
        .route(
            "/routes/:id/markers",
            get(markers::list).post(markers::create),
        )
        .route("/markers/:id", put(markers::update).delete(markers::remove))
        .layer(Extension(api));

    let addr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn root() -> &'static str {
    "wayline"
}

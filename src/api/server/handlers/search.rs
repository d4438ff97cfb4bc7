use axum::extract::{Extension, Json, Query};

use crate::{
    api::interface::DynAPI,
    entities::{SearchPage, SearchQuery},
    error::Error,
};

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchPage>, Error> {
    let page = api.search_routes(query).await?;

    Ok(page.into())
}

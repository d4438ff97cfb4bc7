use super::Engine;

use async_trait::async_trait;

use crate::{
    api::SearchAPI,
    entities::{Route, RouteRow, SearchPage, SearchQuery},
    error::Error,
};

/// Columns the keyword is matched against, with the same literal substring
/// pattern on each.
const SEARCH_COLUMNS: &[&str] = &["name", "description", "city", "district", "created_by"];

#[async_trait]
impl SearchAPI for Engine {
    /// Two-phase search: an exact COUNT under the predicate first, then the
    /// page fetch. The total must never be inferred from the returned row
    /// count, which is page-bounded.
    #[tracing::instrument(skip(self))]
    async fn search_routes(&self, query: SearchQuery) -> Result<SearchPage, Error> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, 100);

        let keyword = query
            .keyword
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let (predicate, pattern) = if keyword.is_empty() {
            (String::new(), None)
        } else {
            let clauses: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|column| format!("{} LIKE ?", column))
                .collect();

            (
                format!("WHERE {}", clauses.join(" OR ")),
                Some(format!("%{}%", keyword)),
            )
        };

        let count_sql = format!("SELECT COUNT(*) FROM routes {}", predicate);

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            for _ in SEARCH_COLUMNS {
                count_query = count_query.bind(pattern.clone());
            }
        }

        let total = count_query.fetch_one(&self.pool).await?;

        if total == 0 {
            return Ok(SearchPage {
                routes: Vec::new(),
                total,
                page,
                page_size,
            });
        }

        let data_sql = format!(
            "SELECT * FROM routes {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            predicate
        );

        let mut data_query = sqlx::query_as::<_, RouteRow>(&data_sql);
        if let Some(pattern) = &pattern {
            for _ in SEARCH_COLUMNS {
                data_query = data_query.bind(pattern.clone());
            }
        }

        let rows = data_query
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await?;

        let routes = rows
            .into_iter()
            .map(Route::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchPage {
            routes,
            total,
            page,
            page_size,
        })
    }
}

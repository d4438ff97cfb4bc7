use super::Database;

use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Pool;

use crate::error::{nothing_to_update_error, Error};

/// Apply an allow-listed sparse update and report how many rows it touched.
///
/// The statement is assembled only from column names present in both the
/// allow-list and the payload; payload keys themselves never reach the SQL
/// text. Zero surviving fields is a validation failure, a missing id is not
/// (it simply affects zero rows).
pub async fn apply_sparse_update(
    pool: &Pool<Database>,
    table: &str,
    allow_list: &[&str],
    id: i64,
    fields: &Map<String, Value>,
    stamp_updated_at: bool,
) -> Result<u64, Error> {
    let matched: Vec<&str> = allow_list
        .iter()
        .copied()
        .filter(|column| fields.contains_key(*column))
        .collect();

    if matched.is_empty() {
        return Err(nothing_to_update_error());
    }

    let mut assignments: Vec<String> = matched
        .iter()
        .map(|column| format!("{} = ?", column))
        .collect();

    if stamp_updated_at {
        assignments.push("updated_at = ?".into());
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?",
        table,
        assignments.join(", ")
    );

    let mut query = sqlx::query(&sql);

    for column in &matched {
        query = bind_value(query, &fields[*column]);
    }

    if stamp_updated_at {
        query = query.bind(chrono::Utc::now());
    }

    let result = query.bind(id).execute(pool).await?;

    Ok(result.rows_affected())
}

/// Bind a loosely-typed payload value to the next statement placeholder.
fn bind_value<'q>(
    query: Query<'q, Database, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Database, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(flag) => query.bind(*flag),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                query.bind(integer)
            } else {
                query.bind(number.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(text) => query.bind(text.clone()),
        other => query.bind(other.to_string()),
    }
}

mod helpers;
mod marker_api;
mod plan_api;
mod route_api;
mod search_api;

use sha2::{Digest, Sha256};
use sqlx::{Executor, Pool, Sqlite};
use std::env;

use crate::{api::API, error::Error};

type Database = Sqlite;

const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub struct Engine {
    pool: Pool<Database>,
}

impl Engine {
    /// Build the engine over an already-connected pool. Schema creation and
    /// administrator seeding happen here, before the engine value exists, so
    /// no request can observe a half-initialized store.
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        pool.execute(
            "CREATE TABLE IF NOT EXISTS routes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT,
                route_type TEXT NOT NULL DEFAULT 'driving',
                city TEXT,
                district TEXT,
                district_type TEXT NOT NULL DEFAULT '区',
                start_longitude REAL NOT NULL,
                start_latitude REAL NOT NULL DEFAULT 0,
                end_longitude REAL NOT NULL,
                end_latitude REAL NOT NULL DEFAULT 0,
                waypoints TEXT NOT NULL,
                intersections INTEGER NOT NULL DEFAULT 0,
                right_turns INTEGER NOT NULL DEFAULT 0,
                left_turns INTEGER NOT NULL DEFAULT 0,
                u_turns INTEGER NOT NULL DEFAULT 0,
                roundabouts INTEGER NOT NULL DEFAULT 0,
                special_traffic_lights INTEGER NOT NULL DEFAULT 0,
                special_intersections INTEGER NOT NULL DEFAULT 0,
                distance REAL NOT NULL DEFAULT 0,
                duration INTEGER NOT NULL DEFAULT 0,
                polyline TEXT NOT NULL DEFAULT '[]',
                steps TEXT NOT NULL DEFAULT '[]',
                tolls REAL NOT NULL DEFAULT 0,
                traffic_lights INTEGER NOT NULL DEFAULT 0,
                created_by TEXT NOT NULL DEFAULT 'system',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .await?;

        pool.execute(
            "CREATE TABLE IF NOT EXISTS route_markers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                route_id INTEGER NOT NULL REFERENCES routes(id) ON DELETE CASCADE,
                longitude REAL NOT NULL,
                latitude REAL NOT NULL,
                name TEXT NOT NULL,
                marker_type TEXT NOT NULL DEFAULT 'important',
                description TEXT,
                image_url TEXT,
                contact TEXT,
                importance INTEGER NOT NULL DEFAULT 1,
                category TEXT NOT NULL DEFAULT 'other',
                created_at TEXT NOT NULL
            )",
        )
        .await?;

        pool.execute(
            "CREATE INDEX IF NOT EXISTS idx_route_markers_route
             ON route_markers(route_id)",
        )
        .await?;

        pool.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .await?;

        seed_admin(&pool).await?;

        Ok(Self { pool })
    }
}

impl API for Engine {}

/// Provision the default administrator account exactly once.
async fn seed_admin(pool: &Pool<Database>) -> Result<(), Error> {
    let existing =
        sqlx::query("SELECT id FROM users WHERE username = ?")
            .bind(DEFAULT_ADMIN_USERNAME)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

    sqlx::query(
        "INSERT INTO users (username, password_hash, is_admin, created_at)
         VALUES (?, ?, 1, ?)",
    )
    .bind(DEFAULT_ADMIN_USERNAME)
    .bind(hash_password(&password))
    .bind(chrono::Utc::now())
    .execute(pool)
    .await?;

    tracing::info!("seeded default administrator account");

    Ok(())
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());

    digest.iter().fold(String::new(), |mut out, byte| {
        out.push_str(&format!("{:02x}", byte));
        out
    })
}

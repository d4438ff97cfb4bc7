//! Store integration tests against an in-memory SQLite pool.
//!
//! Run with: `cargo test --test engine`

use std::time::Duration;

use serde_json::{json, Map, Value};

use wayline::api::{MarkerAPI, RouteAPI, SearchAPI};
use wayline::db;
use wayline::engine::Engine;
use wayline::entities::{Coordinates, NewMarker, NewRoute, RouteFilter, SearchQuery, Step};
use wayline::error::{not_found_error, validation_error};

async fn test_engine() -> Engine {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory store");

    Engine::new(pool).await.expect("bootstrap failed")
}

/// Minimal valid creation payload.
fn draft(name: &str) -> NewRoute {
    NewRoute {
        name: Some(name.into()),
        waypoints: Some(vec![
            Coordinates::new(116.397, 39.909),
            Coordinates::new(116.407, 39.919),
        ]),
        start_longitude: Some(116.397),
        start_latitude: Some(39.909),
        end_longitude: Some(116.407),
        end_latitude: Some(39.919),
        ..Default::default()
    }
}

fn marker_draft(name: &str, importance: i64) -> NewMarker {
    NewMarker {
        longitude: Some(116.4),
        latitude: Some(39.9),
        name: Some(name.into()),
        importance: Some(importance),
        ..Default::default()
    }
}

fn fields(value: Value) -> Map<String, Value> {
    value.as_object().expect("payload must be an object").clone()
}

// ============================================================================
// Bootstrap
// ============================================================================

#[tokio::test]
async fn bootstrap_is_idempotent_and_seeds_one_admin() {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();

    Engine::new(pool.clone()).await.unwrap();
    Engine::new(pool.clone()).await.unwrap();

    let admins: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE username = 'admin' AND is_admin = 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(admins, 1);
}

// ============================================================================
// Route store
// ============================================================================

#[tokio::test]
async fn create_then_fetch_round_trips_serialized_fields() {
    let engine = test_engine().await;

    let mut new_route = draft("A");
    new_route.polyline = Some(vec![
        Coordinates::new(116.397, 39.909),
        Coordinates::new(116.407, 39.919),
    ]);
    new_route.steps = Some(vec![Step {
        instruction: "向西行驶".into(),
        distance: 0.2,
        duration: 1,
        road: "长安街".into(),
        orientation: "西".into(),
    }]);
    new_route.distance = Some(2.7);
    new_route.duration = Some(2);

    let created = engine.create_route(new_route.clone()).await.unwrap();
    let fetched = engine.find_route(created.id).await.unwrap();

    assert_eq!(fetched.name, "A");
    assert_eq!(fetched.waypoints, new_route.waypoints.unwrap());
    assert_eq!(fetched.polyline, new_route.polyline.unwrap());
    assert_eq!(fetched.steps, new_route.steps.unwrap());
    assert_eq!(fetched.distance, 2.7);

    // server-assigned defaults
    assert_eq!(fetched.route_type, "driving");
    assert_eq!(fetched.district_type, "区");
    assert_eq!(fetched.created_by, "system");
    assert_eq!(fetched.intersections, 0);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn create_lists_every_missing_required_field() {
    let engine = test_engine().await;

    let err = engine.create_route(NewRoute::default()).await.unwrap_err();

    assert_eq!(err.code, validation_error(&[]).code);
    for field in ["name", "waypoints", "start_longitude", "end_longitude"] {
        assert!(err.message.contains(field), "missing {}", field);
    }
}

#[tokio::test]
async fn find_unknown_route_is_not_found() {
    let engine = test_engine().await;

    let err = engine.find_route(424242).await.unwrap_err();

    assert_eq!(err.code, not_found_error().code);
}

#[tokio::test]
async fn update_honors_the_allow_list() {
    let engine = test_engine().await;
    let route = engine.create_route(draft("patrol")).await.unwrap();

    // nothing from the allow-list survives filtering
    let err = engine
        .update_route(route.id, fields(json!({ "bogus_field": 1 })))
        .await
        .unwrap_err();
    assert_eq!(err.code, validation_error(&[]).code);

    tokio::time::sleep(Duration::from_millis(5)).await;

    // unknown keys are silently ignored alongside allowed ones
    let receipt = engine
        .update_route(
            route.id,
            fields(json!({ "name": "renamed", "intersections": 4, "id": 999, "bogus": true })),
        )
        .await
        .unwrap();
    assert_eq!(receipt.rows_affected, 1);

    let updated = engine.find_route(route.id).await.unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.intersections, 4);
    assert_eq!(updated.id, route.id);
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn update_of_missing_id_affects_zero_rows() {
    let engine = test_engine().await;

    let receipt = engine
        .update_route(424242, fields(json!({ "name": "x" })))
        .await
        .unwrap();

    assert_eq!(receipt.rows_affected, 0);
}

#[tokio::test]
async fn delete_cascades_to_markers() {
    let engine = test_engine().await;
    let route = engine.create_route(draft("with markers")).await.unwrap();

    for importance in 1..=3 {
        engine
            .create_marker(route.id, marker_draft("checkpoint", importance))
            .await
            .unwrap();
    }
    assert_eq!(engine.list_markers(route.id).await.unwrap().len(), 3);

    let receipt = engine.delete_route(route.id).await.unwrap();
    assert_eq!(receipt.rows_affected, 1);

    assert!(engine.list_markers(route.id).await.unwrap().is_empty());
    assert_eq!(
        engine.find_route(route.id).await.unwrap_err().code,
        not_found_error().code
    );

    // second delete is a no-op, not an error
    let receipt = engine.delete_route(route.id).await.unwrap();
    assert_eq!(receipt.rows_affected, 0);
}

#[tokio::test]
async fn list_applies_conjunctive_filters_and_pagination() {
    let engine = test_engine().await;

    for name in ["north patrol", "south patrol", "east loop"] {
        engine.create_route(draft(name)).await.unwrap();
    }
    let mut walking = draft("river walk");
    walking.route_type = Some("walking".into());
    engine.create_route(walking).await.unwrap();

    let by_type = engine
        .list_routes(RouteFilter {
            route_type: Some("walking".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].name, "river walk");

    let by_name = engine
        .list_routes(RouteFilter {
            name_contains: Some("patrol".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);

    let conjunction = engine
        .list_routes(RouteFilter {
            route_type: Some("driving".into()),
            name_contains: Some("patrol".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(conjunction.len(), 2);

    // newest first
    let all = engine.list_routes(RouteFilter::default()).await.unwrap();
    assert_eq!(all[0].name, "river walk");

    let beyond = engine
        .list_routes(RouteFilter {
            page: 9,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn statistics_aggregate_per_route_type() {
    let engine = test_engine().await;

    for distance in [10.0, 20.0] {
        let mut route = draft("drive");
        route.distance = Some(distance);
        engine.create_route(route).await.unwrap();
    }
    let mut walk = draft("walk");
    walk.route_type = Some("walking".into());
    walk.distance = Some(5.0);
    engine.create_route(walk).await.unwrap();

    let stats = engine.route_statistics().await.unwrap();
    assert_eq!(stats.len(), 2);

    let driving = stats.iter().find(|s| s.route_type == "driving").unwrap();
    assert_eq!(driving.count, 2);
    assert_eq!(driving.total_distance, 30.0);
    assert_eq!(driving.avg_distance, 15.0);

    let walking = stats.iter().find(|s| s.route_type == "walking").unwrap();
    assert_eq!(walking.count, 1);
    assert_eq!(walking.total_distance, 5.0);
}

// ============================================================================
// Marker store
// ============================================================================

#[tokio::test]
async fn marker_creation_validates_fields_and_parent() {
    let engine = test_engine().await;
    let route = engine.create_route(draft("parent")).await.unwrap();

    let err = engine
        .create_marker(route.id, NewMarker::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, validation_error(&[]).code);
    for field in ["longitude", "latitude", "name"] {
        assert!(err.message.contains(field), "missing {}", field);
    }

    let err = engine
        .create_marker(424242, marker_draft("orphan", 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, not_found_error().code);

    let marker = engine
        .create_marker(route.id, marker_draft("gate", 2))
        .await
        .unwrap();
    assert_eq!(marker.route_id, route.id);
    assert_eq!(marker.marker_type, "important");
    assert_eq!(marker.category, "other");
}

#[tokio::test]
async fn markers_order_by_importance_then_recency() {
    let engine = test_engine().await;
    let route = engine.create_route(draft("ordered")).await.unwrap();

    engine
        .create_marker(route.id, marker_draft("low", 1))
        .await
        .unwrap();
    engine
        .create_marker(route.id, marker_draft("high", 5))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    engine
        .create_marker(route.id, marker_draft("low-newer", 1))
        .await
        .unwrap();

    let markers = engine.list_markers(route.id).await.unwrap();
    let names: Vec<&str> = markers.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["high", "low-newer", "low"]);
}

#[tokio::test]
async fn marker_updates_follow_the_sparse_contract() {
    let engine = test_engine().await;
    let route = engine.create_route(draft("parent")).await.unwrap();
    let marker = engine
        .create_marker(route.id, marker_draft("gate", 1))
        .await
        .unwrap();

    let err = engine
        .update_marker(marker.id, fields(json!({ "route_id": 999 })))
        .await
        .unwrap_err();
    assert_eq!(err.code, validation_error(&[]).code);

    let receipt = engine
        .update_marker(
            marker.id,
            fields(json!({ "importance": 9, "image_url": "https://cdn.example/gate.jpg" })),
        )
        .await
        .unwrap();
    assert_eq!(receipt.rows_affected, 1);

    let markers = engine.list_markers(route.id).await.unwrap();
    assert_eq!(markers[0].importance, 9);
    assert_eq!(
        markers[0].image_url.as_deref(),
        Some("https://cdn.example/gate.jpg")
    );

    let receipt = engine.delete_marker(marker.id).await.unwrap();
    assert_eq!(receipt.rows_affected, 1);
    let receipt = engine.delete_marker(marker.id).await.unwrap();
    assert_eq!(receipt.rows_affected, 0);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn search_total_is_exact_across_pages() {
    let engine = test_engine().await;

    for i in 0..12 {
        engine
            .create_route(draft(&format!("patrol {}", i)))
            .await
            .unwrap();
    }
    engine.create_route(draft("unrelated")).await.unwrap();

    let mut fetched = 0;
    for page in 1..=3 {
        let result = engine
            .search_routes(SearchQuery {
                keyword: Some("patrol".into()),
                page,
                page_size: 5,
            })
            .await
            .unwrap();

        assert_eq!(result.total, 12);
        fetched += result.routes.len();
    }
    assert_eq!(fetched, 12);

    // a page past the end stays empty but keeps the full total
    let beyond = engine
        .search_routes(SearchQuery {
            keyword: Some("patrol".into()),
            page: 4,
            page_size: 5,
        })
        .await
        .unwrap();
    assert!(beyond.routes.is_empty());
    assert_eq!(beyond.total, 12);
}

#[tokio::test]
async fn search_matches_any_of_the_five_columns() {
    let engine = test_engine().await;

    let mut in_description = draft("plain");
    in_description.description = Some("经过深南大道".into());
    let mut in_city = draft("plain");
    in_city.city = Some("深南市".into());
    let mut in_district = draft("plain");
    in_district.district = Some("深南".into());
    let mut in_created_by = draft("plain");
    in_created_by.created_by = Some("深南小队".into());
    let in_name = draft("深南巡线");

    for route in [in_description, in_city, in_district, in_created_by, in_name] {
        engine.create_route(route).await.unwrap();
    }
    engine.create_route(draft("elsewhere")).await.unwrap();

    let result = engine
        .search_routes(SearchQuery {
            keyword: Some("  深南  ".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.routes.len(), 5);
}

#[tokio::test]
async fn blank_keyword_matches_everything() {
    let engine = test_engine().await;

    engine.create_route(draft("one")).await.unwrap();
    engine.create_route(draft("two")).await.unwrap();

    for keyword in [None, Some("   ".to_string())] {
        let result = engine
            .search_routes(SearchQuery {
                keyword,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.routes.len(), 2);
    }
}

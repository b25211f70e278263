//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use teleporter_api::extract::{ACTOR_ELEVATED_HEADER, ACTOR_ID_HEADER};
use teleporter_api::routes;
use teleporter_api::state::AppState;
use teleporter_core::actor::Actor;
use teleporter_store::pg_group_registry::PgGroupRegistry;
use teleporter_store::pg_scene_store::PgSceneStore;
use teleporter_test_support::{FixedClock, RecordingNotifier};
use tower::ServiceExt;
use uuid::Uuid;

/// Build the full app router over the `PostgreSQL` adapters. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> (Router, AppState) {
    let app_state = AppState::new(
        Arc::new(PgSceneStore::new(pool.clone())),
        Arc::new(PgGroupRegistry::new(pool)),
        Arc::new(FixedClock::default()),
        Arc::new(RecordingNotifier::new()),
    );
    (routes::router().with_state(app_state.clone()), app_state)
}

/// Insert a scene with regions laid out 1000 units apart along x. Returns
/// the scene id and region ids in the order given.
pub async fn seed_scene(pool: &PgPool, region_names: &[&str]) -> (Uuid, Vec<Uuid>) {
    let scene_id = Uuid::new_v4();
    sqlx::query("INSERT INTO scenes (scene_id, name) VALUES ($1, 'Tower')")
        .bind(scene_id)
        .execute(pool)
        .await
        .unwrap();

    let mut region_ids = Vec::new();
    for (i, name) in region_names.iter().enumerate() {
        let region_id = Uuid::new_v4();
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64 * 1000.0;
        sqlx::query(
            "INSERT INTO regions (region_id, scene_id, name, origin_x, origin_y) \
             VALUES ($1, $2, $3, $4, 0)",
        )
        .bind(region_id)
        .bind(scene_id)
        .bind(*name)
        .bind(x)
        .execute(pool)
        .await
        .unwrap();
        region_ids.push(region_id);
    }
    (scene_id, region_ids)
}

/// Insert an entity owned by `owner` at `(x, y)` inside `region_id`.
pub async fn seed_entity(
    pool: &PgPool,
    scene_id: Uuid,
    region_id: Uuid,
    owner: Uuid,
    (x, y): (f64, f64),
) -> Uuid {
    let entity_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO entities (entity_id, scene_id, region_id, name, x, y, owners) \
         VALUES ($1, $2, $3, 'Hero', $4, $5, $6)",
    )
    .bind(entity_id)
    .bind(scene_id)
    .bind(region_id)
    .bind(x)
    .bind(y)
    .bind(vec![owner])
    .execute(pool)
    .await
    .unwrap();
    entity_id
}

/// Send a request with an optional JSON body and acting user, and return
/// the status and JSON response (`Null` when empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    actor: Option<Actor>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder
            .header(ACTOR_ID_HEADER, actor.id.to_string())
            .header(ACTOR_ELEVATED_HEADER, actor.elevated.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
        })
    };

    (status, json)
}

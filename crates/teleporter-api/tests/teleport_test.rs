//! Integration tests for the Navigation bounded context.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use teleporter_core::actor::Actor;
use uuid::Uuid;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_prompt_and_respond_teleports_entity(pool: PgPool) {
    // Arrange
    let actor = Actor::player(Uuid::new_v4());
    let (scene_id, regions) = common::seed_scene(&pool, &["Attic", "Hall", "Cellar"]).await;
    let hero = common::seed_entity(&pool, scene_id, regions[1], actor.id, (1035.0, 70.0)).await;
    let (app, state) = common::build_test_app(pool.clone());
    common::send(
        app.clone(),
        "POST",
        &format!("/api/v1/scenes/{scene_id}/groups"),
        None,
        Some(&json!({ "name": "default", "region_ids": regions })),
    )
    .await;

    let prompt_app = app.clone();
    let body = json!({ "source_region_id": regions[1], "entity_id": hero });
    let waiting = tokio::spawn(async move {
        common::send(
            prompt_app,
            "POST",
            "/api/v1/teleport/prompt",
            Some(actor),
            Some(&body),
        )
        .await
    });

    // Act
    let prompt_id = loop {
        if let Some(view) = state.prompts.pending(Some(actor.id)).unwrap().first() {
            break view.prompt_id;
        }
        tokio::task::yield_now().await;
    };
    let (respond_status, _) = common::send(
        app,
        "POST",
        &format!("/api/v1/prompts/{prompt_id}/respond"),
        Some(actor),
        Some(&json!({ "choice": regions[0] })),
    )
    .await;
    let (status, json) = waiting.await.unwrap();

    // Assert
    assert_eq!(respond_status, StatusCode::NO_CONTENT);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["teleported"], true);
    let row: (Option<Uuid>, f64, f64) =
        sqlx::query_as("SELECT region_id, x, y FROM entities WHERE entity_id = $1")
            .bind(hero)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, Some(regions[0]));
    assert!((row.1 - 35.0).abs() < f64::EPSILON);
    assert!((row.2 - 70.0).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_shift_elevation_round_trip(pool: PgPool) {
    let actor = Actor::player(Uuid::new_v4());
    let (scene_id, regions) = common::seed_scene(&pool, &["Well"]).await;
    let hero = common::seed_entity(&pool, scene_id, regions[0], actor.id, (5.0, 5.0)).await;
    let (app, _) = common::build_test_app(pool);
    let body = json!({ "entity_id": hero, "top": 20.0, "bottom": 0.0, "policy": "roof" });

    let (status, json) = common::send(
        app,
        "POST",
        "/api/v1/elevation/shift",
        Some(actor),
        Some(&body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["change"]["from"], 0.0);
    assert_eq!(json["change"]["to"], 20.0);
}

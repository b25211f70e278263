//! Routes for the Elevation bounded context.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use teleporter_elevation::application::command_handlers::{self, ElevationChange};
use teleporter_elevation::domain::commands;
use teleporter_elevation::domain::shifter::ElevationPolicy;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::RequestActor;
use crate::state::AppState;

/// Request body for POST /shift.
#[derive(Debug, Deserialize)]
pub struct ShiftElevationRequest {
    /// The entity that triggered the shift.
    pub entity_id: Uuid,
    /// Upper reference elevation.
    pub top: f64,
    /// Lower reference elevation.
    pub bottom: f64,
    /// How to move between them.
    pub policy: ElevationPolicy,
}

/// Response body for POST /shift.
#[derive(Debug, Serialize)]
pub struct ShiftElevationResponse {
    /// Whether an elevation was written.
    pub changed: bool,
    /// The write, when one happened.
    pub change: Option<ElevationChange>,
}

/// POST /shift
#[instrument(
    skip(state, actor, request),
    fields(actor_id = %actor.0.id, entity_id = %request.entity_id, policy = ?request.policy)
)]
async fn shift_elevation(
    State(state): State<AppState>,
    actor: RequestActor,
    Json(request): Json<ShiftElevationRequest>,
) -> Result<Json<ShiftElevationResponse>, ApiError> {
    let command = commands::ShiftElevation {
        correlation_id: Uuid::new_v4(),
        entity_id: request.entity_id,
        top: request.top,
        bottom: request.bottom,
        policy: request.policy,
    };

    info!(correlation_id = %command.correlation_id, "handling shift_elevation command");

    let change =
        command_handlers::handle_shift_elevation(&command, &actor.0, &*state.scene_store).await?;

    Ok(Json(ShiftElevationResponse {
        changed: change.is_some(),
        change,
    }))
}

/// Returns the router for the elevation context.
pub fn router() -> Router<AppState> {
    Router::new().route("/shift", post(shift_elevation))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use teleporter_core::actor::Actor;
    use teleporter_core::geometry::Point;
    use teleporter_core::scene::EntityRef;

    use super::*;
    use crate::routes::testing::{TestWorld, send};

    fn hero_at(world: &TestWorld, elevation: f64, owner: Uuid) -> EntityRef {
        let region = world
            .store
            .add_region(Uuid::new_v4(), "Ladder Well", Point::new(0.0, 0.0));
        let hero = world
            .store
            .place_entity(&region, "Hero", Point::new(5.0, 5.0), vec![owner]);
        world.store.set_elevation(hero.id, elevation);
        hero
    }

    #[tokio::test]
    async fn test_ladder_shift_writes_new_elevation() {
        // Arrange
        let world = TestWorld::new();
        let actor = Actor::player(Uuid::new_v4());
        let hero = hero_at(&world, 0.0, actor.id);

        // Act
        let (status, json) = send(
            router().with_state(world.state.clone()),
            Method::POST,
            "/shift",
            Some(actor),
            Some(json!({ "entity_id": hero.id, "top": 10.0, "bottom": 0.0, "policy": "ladder" })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["changed"], true);
        assert_eq!(json["change"]["to"], 10.0);
        assert_eq!(world.store.elevation_writes(), vec![(hero.id, 10.0)]);
    }

    #[tokio::test]
    async fn test_shift_by_non_owner_changes_nothing() {
        let world = TestWorld::new();
        let hero = hero_at(&world, 0.0, Uuid::new_v4());

        let (status, json) = send(
            router().with_state(world.state.clone()),
            Method::POST,
            "/shift",
            Some(Actor::player(Uuid::new_v4())),
            Some(json!({ "entity_id": hero.id, "top": 10.0, "bottom": 0.0, "policy": "roof" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["changed"], false);
        assert!(json["change"].is_null());
        assert!(world.store.elevation_writes().is_empty());
    }

    #[tokio::test]
    async fn test_shift_rejects_unknown_policy() {
        let world = TestWorld::new();

        let (status, body) = send(
            router().with_state(world.state),
            Method::POST,
            "/shift",
            Some(Actor::game_master(Uuid::new_v4())),
            Some(json!({ "entity_id": Uuid::new_v4(), "top": 1.0, "bottom": 0.0, "policy": "trampoline" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.is_string());
    }

    #[tokio::test]
    async fn test_shift_unknown_entity_returns_404() {
        let world = TestWorld::new();

        let (status, json) = send(
            router().with_state(world.state),
            Method::POST,
            "/shift",
            Some(Actor::game_master(Uuid::new_v4())),
            Some(json!({ "entity_id": Uuid::new_v4(), "top": 1.0, "bottom": 0.0, "policy": "pit" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

//! Routes for the Navigation bounded context.
//!
//! `POST /prompt` holds the request open until the actor answers through
//! the prompts routes.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use teleporter_groups::domain::commands::DEFAULT_GROUP;
use teleporter_navigation::application::command_handlers::{self, TeleportOutcome};
use teleporter_navigation::domain::commands;
use teleporter_navigation::domain::selection::{PromptOptions, SelectionRequest};
use teleporter_navigation::domain::teleport::{EntityMove, TeleportPlan};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::RequestActor;
use crate::state::AppState;

fn default_group() -> String {
    DEFAULT_GROUP.to_owned()
}

/// Request body for POST /prompt.
#[derive(Debug, Deserialize)]
pub struct PromptTeleportRequest {
    /// The region the triggering entity stands in.
    pub source_region_id: Uuid,
    /// The entity that triggered the teleporter.
    pub entity_id: Uuid,
    /// The group to choose from.
    #[serde(default = "default_group")]
    pub group: String,
    /// Prompt presentation.
    #[serde(default)]
    pub options: PromptOptions,
}

/// Request body for POST /apply.
#[derive(Debug, Deserialize)]
pub struct ApplyTeleportRequest {
    /// The region the entities are standing in.
    pub source_region_id: Uuid,
    /// The region to move them to.
    pub destination_region_id: Uuid,
}

/// Response body for both teleport routes.
#[derive(Debug, Serialize)]
pub struct TeleportResponse {
    /// Whether anything was relocated.
    pub teleported: bool,
    /// Where the entities went, if anywhere.
    pub destination_region_id: Option<Uuid>,
    /// Entities moved, with old and new positions.
    pub moved: Vec<EntityMove>,
    /// Entities left behind because the actor does not own them.
    pub skipped: Vec<Uuid>,
}

impl TeleportResponse {
    fn from_plan(destination_region_id: Uuid, plan: TeleportPlan) -> Self {
        Self {
            teleported: !plan.moves.is_empty(),
            destination_region_id: Some(destination_region_id),
            moved: plan.moves,
            skipped: plan.skipped,
        }
    }

    fn nothing() -> Self {
        Self {
            teleported: false,
            destination_region_id: None,
            moved: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl From<Option<TeleportOutcome>> for TeleportResponse {
    fn from(outcome: Option<TeleportOutcome>) -> Self {
        outcome.map_or_else(Self::nothing, |o| {
            Self::from_plan(o.destination_region_id, o.plan)
        })
    }
}

/// POST /prompt
#[instrument(
    skip(state, actor, request),
    fields(actor_id = %actor.0.id, entity_id = %request.entity_id, group = %request.group)
)]
async fn prompt_teleport(
    State(state): State<AppState>,
    actor: RequestActor,
    Json(request): Json<PromptTeleportRequest>,
) -> Result<Json<TeleportResponse>, ApiError> {
    let command = commands::PromptTeleport {
        correlation_id: Uuid::new_v4(),
        request: SelectionRequest {
            source_region_id: request.source_region_id,
            entity_id: request.entity_id,
            group: request.group,
            options: request.options,
        },
    };

    info!(correlation_id = %command.correlation_id, "handling prompt_teleport command");

    let outcome = command_handlers::handle_prompt_teleport(
        &command,
        &actor.0,
        &*state.scene_store,
        &*state.group_registry,
        &*state.prompts,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// POST /apply
#[instrument(
    skip(state, actor, request),
    fields(actor_id = %actor.0.id, destination = %request.destination_region_id)
)]
async fn apply_teleport(
    State(state): State<AppState>,
    actor: RequestActor,
    Json(request): Json<ApplyTeleportRequest>,
) -> Result<Json<TeleportResponse>, ApiError> {
    let command = commands::ApplyTeleport {
        correlation_id: Uuid::new_v4(),
        source_region_id: request.source_region_id,
        destination_region_id: request.destination_region_id,
    };

    info!(correlation_id = %command.correlation_id, "handling apply_teleport command");

    let plan = command_handlers::apply_teleport(&command, &actor.0, &*state.scene_store).await?;

    Ok(Json(TeleportResponse::from_plan(
        command.destination_region_id,
        plan,
    )))
}

/// Returns the router for the navigation context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prompt", post(prompt_teleport))
        .route("/apply", post(apply_teleport))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use teleporter_core::actor::Actor;
    use teleporter_core::geometry::Point;
    use teleporter_core::interaction::PromptOutcome;
    use teleporter_core::scene::{EntityRef, RegionRef};

    use super::*;
    use crate::prompt_hub::PendingPromptView;
    use crate::routes::testing::{TestWorld, send};

    struct Tower {
        world: TestWorld,
        actor: Actor,
        scene_id: Uuid,
        floors: Vec<RegionRef>,
        hero: EntityRef,
    }

    /// Three floors 1000 units apart, grouped as "tower", with the actor's
    /// hero standing in the middle one.
    fn tower() -> Tower {
        let world = TestWorld::new();
        let actor = Actor::player(Uuid::new_v4());
        let scene_id = Uuid::new_v4();
        let floors: Vec<RegionRef> = ["Attic", "Hall", "Cellar"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64 * 1000.0;
                world.store.add_region(scene_id, name, Point::new(x, 0.0))
            })
            .collect();
        let hero = world.store.place_entity(
            &floors[1],
            "Hero",
            Point::new(1035.0, 70.0),
            vec![actor.id],
        );
        Tower {
            world,
            actor,
            scene_id,
            floors,
            hero,
        }
    }

    async fn create_group(tower: &Tower, name: &str) {
        let all: Vec<Uuid> = tower.floors.iter().map(|f| f.id).collect();
        let (status, _) = send(
            crate::routes::router().with_state(tower.world.state.clone()),
            Method::POST,
            &format!("/api/v1/scenes/{}/groups", tower.scene_id),
            None,
            Some(json!({ "name": name, "region_ids": all })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn wait_for_prompt(state: &AppState) -> PendingPromptView {
        loop {
            if let Some(view) = state.prompts.pending(None).unwrap().into_iter().next() {
                return view;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_prompt_waits_for_answer_then_teleports() {
        // Arrange
        let t = tower();
        create_group(&t, "tower").await;
        let app = router().with_state(t.world.state.clone());
        let body = json!({
            "source_region_id": t.floors[1].id,
            "entity_id": t.hero.id,
            "group": "tower",
            "options": { "mode": "ladder" }
        });
        let actor = t.actor;
        let waiting = tokio::spawn(async move {
            send(app, Method::POST, "/prompt", Some(actor), Some(body)).await
        });

        // Act
        let pending = wait_for_prompt(&t.world.state).await;
        t.world
            .state
            .prompts
            .respond(pending.prompt_id, &t.actor, PromptOutcome::Chosen(t.floors[2].id))
            .unwrap();
        let (status, json) = waiting.await.unwrap();

        // Assert
        assert_eq!(pending.prompt.title, "Ladder");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["teleported"], true);
        assert_eq!(json["destination_region_id"], json!(t.floors[2].id));
        assert_eq!(
            t.world.store.entity(t.hero.id).unwrap().position,
            Point::new(2035.0, 70.0)
        );
    }

    #[tokio::test]
    async fn test_prompt_cancelled_moves_nothing() {
        // Arrange
        let t = tower();
        create_group(&t, "default").await;
        let app = router().with_state(t.world.state.clone());
        let body = json!({ "source_region_id": t.floors[1].id, "entity_id": t.hero.id });
        let actor = t.actor;
        let waiting = tokio::spawn(async move {
            send(app, Method::POST, "/prompt", Some(actor), Some(body)).await
        });

        // Act
        let pending = wait_for_prompt(&t.world.state).await;
        t.world
            .state
            .prompts
            .respond(pending.prompt_id, &t.actor, PromptOutcome::Cancelled)
            .unwrap();
        let (status, json) = waiting.await.unwrap();

        // Assert
        assert_eq!(pending.prompt.title, "Elevator");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["teleported"], false);
        assert!(json["destination_region_id"].is_null());
        assert!(t.world.store.position_writes().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_for_unknown_group_returns_404() {
        let t = tower();

        let (status, json) = send(
            router().with_state(t.world.state.clone()),
            Method::POST,
            "/prompt",
            Some(t.actor),
            Some(json!({
                "source_region_id": t.floors[1].id,
                "entity_id": t.hero.id,
                "group": "missing"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_apply_moves_owned_entities_only() {
        // Arrange
        let t = tower();
        let stranger = t.world.store.place_entity(
            &t.floors[1],
            "Stranger",
            Point::new(1100.0, 10.0),
            vec![Uuid::new_v4()],
        );

        // Act
        let (status, json) = send(
            router().with_state(t.world.state.clone()),
            Method::POST,
            "/apply",
            Some(t.actor),
            Some(json!({
                "source_region_id": t.floors[1].id,
                "destination_region_id": t.floors[0].id
            })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["moved"].as_array().unwrap().len(), 1);
        assert_eq!(json["moved"][0]["to"], json!({ "x": 35.0, "y": 70.0 }));
        assert_eq!(json["skipped"], json!([stranger.id]));
    }

    #[tokio::test]
    async fn test_apply_requires_actor_header() {
        let t = tower();

        let (status, _) = send(
            router().with_state(t.world.state.clone()),
            Method::POST,
            "/apply",
            None,
            Some(json!({
                "source_region_id": t.floors[1].id,
                "destination_region_id": t.floors[0].id
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

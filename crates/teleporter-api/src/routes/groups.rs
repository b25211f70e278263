//! Routes for the Region Groups bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use teleporter_core::error::DomainError;
use teleporter_core::scene::SceneStore;
use teleporter_groups::application::command_handlers::{
    self, GroupCommandResult, resolve_region,
};
use teleporter_groups::application::query_handlers::{self, GroupView};
use teleporter_groups::domain::commands;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::RequestActor;
use crate::state::AppState;

/// Request body for POST /{scene_id}/groups.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name, unique within the scene.
    pub name: String,
    /// Initial members, in order.
    #[serde(default)]
    pub region_ids: Vec<Uuid>,
}

/// Request body for POST /{scene_id}/groups/{name}/regions.
#[derive(Debug, Deserialize)]
pub struct InsertRegionRequest {
    /// The region to add.
    pub region_id: Uuid,
    /// Position to insert at; appends when absent or out of range.
    #[serde(default)]
    pub index: Option<usize>,
}

/// Request body for POST /{scene_id}/groups/{name}/swap.
#[derive(Debug, Deserialize)]
pub struct SwapRegionsRequest {
    /// First position.
    pub first: usize,
    /// Second position.
    pub second: usize,
}

/// Request body for POST /{scene_id}/groups/{name}/move.
#[derive(Debug, Deserialize)]
pub struct MoveRegionRequest {
    /// Current position.
    pub from: usize,
    /// Target position.
    pub to: usize,
}

/// Request body for POST /{scene_id}/groups/{name}/reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderGroupRequest {
    /// Old positions listed in their new order.
    pub new_order: Vec<usize>,
}

/// Response body returned after a group mutation.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    /// The owning scene.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
    /// Member ids in group order.
    pub order: Vec<Uuid>,
}

impl From<GroupCommandResult> for GroupResponse {
    fn from(result: GroupCommandResult) -> Self {
        Self {
            scene_id: result.scene_id,
            group: result.group,
            order: result.order,
        }
    }
}

/// Response body returned after pruning a group.
#[derive(Debug, Serialize)]
pub struct ValidateGroupResponse {
    /// The group after pruning.
    #[serde(flatten)]
    pub group: GroupResponse,
    /// Ids dropped because their regions no longer exist.
    pub removed: Vec<Uuid>,
}

async fn ensure_region_in_scene(
    store: &dyn SceneStore,
    scene_id: Uuid,
    region_id: Uuid,
) -> Result<(), DomainError> {
    let resolved = resolve_region(store, region_id).await?;
    if resolved.scene_id != scene_id {
        return Err(DomainError::Validation(format!(
            "region {region_id} is not in scene {scene_id}"
        )));
    }
    Ok(())
}

/// GET /{scene_id}/groups
#[instrument(skip(state))]
async fn list_groups(
    State(state): State<AppState>,
    Path(scene_id): Path<Uuid>,
) -> Result<Json<Vec<GroupView>>, ApiError> {
    let views =
        query_handlers::list_groups(scene_id, &*state.group_registry, &*state.scene_store)
            .await?;
    Ok(Json(views))
}

/// POST /{scene_id}/groups
#[instrument(skip(state, request), fields(group = %request.name))]
async fn create_group(
    State(state): State<AppState>,
    Path(scene_id): Path<Uuid>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    let command = commands::CreateGroup {
        correlation_id: Uuid::new_v4(),
        scene_id,
        name: request.name,
        region_ids: request.region_ids,
    };

    info!(correlation_id = %command.correlation_id, "handling create_group command");

    let result = command_handlers::handle_create_group(
        &command,
        &*state.scene_store,
        &*state.group_registry,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(result.into())))
}

/// DELETE /{scene_id}/groups
#[instrument(skip(state))]
async fn clear_all_groups(
    State(state): State<AppState>,
    Path(scene_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    clear(&state, scene_id, None).await
}

/// GET /{scene_id}/groups/{name}
#[instrument(skip(state))]
async fn get_group(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
) -> Result<Json<GroupView>, ApiError> {
    let view = query_handlers::get_group(
        scene_id,
        &name,
        &*state.group_registry,
        &*state.scene_store,
    )
    .await?;
    Ok(Json(view))
}

/// DELETE /{scene_id}/groups/{name}
#[instrument(skip(state))]
async fn clear_group(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
) -> Result<StatusCode, ApiError> {
    clear(&state, scene_id, Some(name)).await
}

async fn clear(
    state: &AppState,
    scene_id: Uuid,
    group: Option<String>,
) -> Result<StatusCode, ApiError> {
    let command = commands::ClearGroups {
        correlation_id: Uuid::new_v4(),
        scene_id,
        group,
    };

    info!(correlation_id = %command.correlation_id, "handling clear_groups command");

    command_handlers::handle_clear_groups(&command, &*state.group_registry).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{scene_id}/groups/{name}/regions
#[instrument(skip(state, request), fields(region_id = %request.region_id))]
async fn insert_region(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
    Json(request): Json<InsertRegionRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    ensure_region_in_scene(&*state.scene_store, scene_id, request.region_id).await?;

    let command = commands::InsertRegion {
        correlation_id: Uuid::new_v4(),
        region_id: request.region_id,
        group: name,
        index: request.index,
    };

    info!(correlation_id = %command.correlation_id, "handling insert_region command");

    let result = command_handlers::handle_insert_region(
        &command,
        &*state.scene_store,
        &*state.group_registry,
    )
    .await?;

    Ok(Json(result.into()))
}

/// DELETE /{scene_id}/groups/{name}/regions/{region_id}
#[instrument(skip(state))]
async fn remove_region(
    State(state): State<AppState>,
    Path((scene_id, name, region_id)): Path<(Uuid, String, Uuid)>,
) -> Result<Json<GroupResponse>, ApiError> {
    ensure_region_in_scene(&*state.scene_store, scene_id, region_id).await?;

    let command = commands::RemoveRegion {
        correlation_id: Uuid::new_v4(),
        region_id,
        group: name,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_region command");

    let result = command_handlers::handle_remove_region(
        &command,
        &*state.scene_store,
        &*state.group_registry,
    )
    .await?;

    Ok(Json(result.into()))
}

/// POST /{scene_id}/groups/{name}/swap
#[instrument(skip(state, request), fields(first = request.first, second = request.second))]
async fn swap_regions(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
    Json(request): Json<SwapRegionsRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let command = commands::SwapRegions {
        correlation_id: Uuid::new_v4(),
        scene_id,
        group: name,
        first: request.first,
        second: request.second,
    };

    info!(correlation_id = %command.correlation_id, "handling swap_regions command");

    let result = command_handlers::handle_swap_regions(&command, &*state.group_registry).await?;
    Ok(Json(result.into()))
}

/// POST /{scene_id}/groups/{name}/move
#[instrument(skip(state, request), fields(from = request.from, to = request.to))]
async fn move_region(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
    Json(request): Json<MoveRegionRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let command = commands::MoveRegion {
        correlation_id: Uuid::new_v4(),
        scene_id,
        group: name,
        from: request.from,
        to: request.to,
    };

    info!(correlation_id = %command.correlation_id, "handling move_region command");

    let result = command_handlers::handle_move_region(&command, &*state.group_registry).await?;
    Ok(Json(result.into()))
}

/// POST /{scene_id}/groups/{name}/reorder
#[instrument(skip(state, request))]
async fn reorder_group(
    State(state): State<AppState>,
    Path((scene_id, name)): Path<(Uuid, String)>,
    Json(request): Json<ReorderGroupRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    let command = commands::ReorderGroup {
        correlation_id: Uuid::new_v4(),
        scene_id,
        group: name,
        new_order: request.new_order,
    };

    info!(correlation_id = %command.correlation_id, "handling reorder_group command");

    let result =
        command_handlers::handle_reorder_group(&command, &*state.group_registry).await?;
    Ok(Json(result.into()))
}

/// POST /{scene_id}/groups/{name}/validate
#[instrument(skip(state, actor), fields(actor_id = %actor.0.id))]
async fn validate_group(
    State(state): State<AppState>,
    actor: RequestActor,
    Path((scene_id, name)): Path<(Uuid, String)>,
) -> Result<Json<ValidateGroupResponse>, ApiError> {
    let command = commands::ValidateGroup {
        correlation_id: Uuid::new_v4(),
        scene_id,
        group: name,
    };

    info!(correlation_id = %command.correlation_id, "handling validate_group command");

    let report = command_handlers::handle_validate_group(
        &command,
        &actor.0,
        &*state.scene_store,
        &*state.group_registry,
        &*state.notifier,
    )
    .await?;

    Ok(Json(ValidateGroupResponse {
        group: report.result.into(),
        removed: report.removed,
    }))
}

/// Returns the router for the groups context, nested under `/api/v1/scenes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{scene_id}/groups",
            get(list_groups).post(create_group).delete(clear_all_groups),
        )
        .route("/{scene_id}/groups/{name}", get(get_group).delete(clear_group))
        .route("/{scene_id}/groups/{name}/regions", post(insert_region))
        .route(
            "/{scene_id}/groups/{name}/regions/{region_id}",
            delete(remove_region),
        )
        .route("/{scene_id}/groups/{name}/swap", post(swap_regions))
        .route("/{scene_id}/groups/{name}/move", post(move_region))
        .route("/{scene_id}/groups/{name}/reorder", post(reorder_group))
        .route("/{scene_id}/groups/{name}/validate", post(validate_group))
}

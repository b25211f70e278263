//! Command handlers for the Navigation context.
//!
//! Selection suspends exactly once, while the interaction surface waits for
//! the actor. Cancellation, dismissal, and a non-owning actor all end the
//! flow with `SelectionResult::NoSelection` rather than an error.

use teleporter_core::actor::Actor;
use teleporter_core::command::Command;
use teleporter_core::error::DomainError;
use teleporter_core::interaction::{InteractionSurface, PromptOutcome};
use teleporter_core::registry::GroupRegistry;
use teleporter_core::scene::{RegionRef, SceneStore, UpdateOptions};
use teleporter_groups::application::command_handlers::load_current_group;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::commands::{ApplyTeleport, PromptTeleport};
use crate::domain::selection::{CandidateSet, SelectionRequest, SelectionResult};
use crate::domain::teleport::{TeleportPlan, plan_teleport};

/// Result of a completed prompt-and-teleport flow.
#[derive(Debug, Clone, PartialEq)]
pub struct TeleportOutcome {
    /// Where the entities went.
    pub destination_region_id: Uuid,
    /// What moved and what stayed.
    pub plan: TeleportPlan,
}

async fn fetch_region(store: &dyn SceneStore, id: Uuid) -> Result<RegionRef, DomainError> {
    store
        .fetch_region(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("region {id}")))
}

/// Asks `actor` to pick a destination from the request's group.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the entity, source region, or group
/// does not exist, or (ladder mode) the source region is not a member.
/// Returns `DomainError::Validation` for ladder mode on a singleton group,
/// or if the surface answers with a region that was not offered.
pub async fn resolve_destination(
    request: &SelectionRequest,
    actor: &Actor,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
    surface: &dyn InteractionSurface,
) -> Result<SelectionResult, DomainError> {
    let entity = store
        .fetch_entity(request.entity_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("entity {}", request.entity_id)))?;
    if !entity.is_owned_by(actor) {
        debug!(actor_id = %actor.id, entity_id = %entity.id, "actor does not own entity");
        return Ok(SelectionResult::NoSelection);
    }

    let source = fetch_region(store, request.source_region_id).await?;
    let group = load_current_group(registry, store, source.scene_id, &request.group).await?;

    let candidates = CandidateSet::build(&group, source.id, request.options.mode)?;
    if candidates.is_empty() {
        debug!(group = group.name(), "group offers no destinations");
        return Ok(SelectionResult::NoSelection);
    }

    let prompt = candidates.to_prompt(&request.options);
    let outcome = surface.present(actor, prompt.clone()).await?;

    match outcome {
        PromptOutcome::Cancelled => {
            debug!(actor_id = %actor.id, group = group.name(), "selection cancelled");
            Ok(SelectionResult::NoSelection)
        }
        PromptOutcome::Chosen(id) if prompt.offers(id) => Ok(SelectionResult::Destination(id)),
        PromptOutcome::Chosen(id) => Err(DomainError::Validation(format!(
            "region {id} was not one of the offered destinations"
        ))),
    }
}

/// Moves every entity in the source region that `actor` owns to the same
/// offset inside the destination region. Positions are written with
/// animation suppressed.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if either region does not exist.
pub async fn apply_teleport(
    command: &ApplyTeleport,
    actor: &Actor,
    store: &dyn SceneStore,
) -> Result<TeleportPlan, DomainError> {
    let source = fetch_region(store, command.source_region_id).await?;
    let destination = fetch_region(store, command.destination_region_id).await?;
    let entities = store.entities_in_region(source.id).await?;

    let plan = plan_teleport(&source, &destination, &entities, actor);
    for entity_move in &plan.moves {
        store
            .update_entity_position(
                entity_move.entity_id,
                entity_move.to,
                UpdateOptions {
                    teleport: true,
                    region_id: Some(destination.id),
                },
            )
            .await?;
    }

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        source = %source.id,
        destination = %destination.id,
        moved = plan.moves.len(),
        skipped = plan.skipped.len(),
        "teleported entities"
    );

    Ok(plan)
}

/// Handles the `PromptTeleport` command: resolves a destination and, if the
/// actor picked one that still exists, teleports there. Returns `None` when
/// nothing moved.
///
/// # Errors
///
/// Propagates the errors of `resolve_destination` and `apply_teleport`.
pub async fn handle_prompt_teleport(
    command: &PromptTeleport,
    actor: &Actor,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
    surface: &dyn InteractionSurface,
) -> Result<Option<TeleportOutcome>, DomainError> {
    let request = &command.request;
    let result = resolve_destination(request, actor, store, registry, surface).await?;
    let Some(destination_region_id) = result.destination() else {
        return Ok(None);
    };

    if store.fetch_region(destination_region_id).await?.is_none() {
        debug!(%destination_region_id, "destination vanished before teleport");
        return Ok(None);
    }

    let plan = apply_teleport(
        &ApplyTeleport {
            correlation_id: command.correlation_id(),
            source_region_id: request.source_region_id,
            destination_region_id,
        },
        actor,
        store,
    )
    .await?;

    Ok(Some(TeleportOutcome {
        destination_region_id,
        plan,
    }))
}

//! Command handlers for the Elevation context.

use serde::Serialize;
use teleporter_core::actor::Actor;
use teleporter_core::command::Command;
use teleporter_core::error::DomainError;
use teleporter_core::scene::SceneStore;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::commands::ShiftElevation;
use crate::domain::shifter::shift;

/// An elevation write that was performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationChange {
    /// The entity that moved.
    pub entity_id: Uuid,
    /// Elevation before the shift.
    pub from: f64,
    /// Elevation after the shift.
    pub to: f64,
}

/// Handles the `ShiftElevation` command. Returns `None` when the actor does
/// not own the entity or the policy leaves the elevation unchanged; nothing
/// is written in either case.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the entity does not exist.
#[allow(clippy::float_cmp)]
pub async fn handle_shift_elevation(
    command: &ShiftElevation,
    actor: &Actor,
    store: &dyn SceneStore,
) -> Result<Option<ElevationChange>, DomainError> {
    let entity = store
        .fetch_entity(command.entity_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("entity {}", command.entity_id)))?;
    if !entity.is_owned_by(actor) {
        debug!(actor_id = %actor.id, entity_id = %entity.id, "actor does not own entity");
        return Ok(None);
    }

    let target = shift(entity.elevation, command.top, command.bottom, command.policy);
    if target == entity.elevation {
        debug!(entity_id = %entity.id, elevation = entity.elevation, "elevation unchanged");
        return Ok(None);
    }

    store.update_entity_elevation(entity.id, target).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        entity_id = %entity.id,
        from = entity.elevation,
        to = target,
        "shifted elevation"
    );

    Ok(Some(ElevationChange {
        entity_id: entity.id,
        from: entity.elevation,
        to: target,
    }))
}

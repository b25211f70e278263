//! Teleport transform.

use serde::Serialize;
use teleporter_core::actor::Actor;
use teleporter_core::geometry::Point;
use teleporter_core::scene::{EntityRef, RegionRef};
use uuid::Uuid;

/// A single entity relocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityMove {
    /// The entity being moved.
    pub entity_id: Uuid,
    /// Position before the move.
    pub from: Point,
    /// Position after the move.
    pub to: Point,
}

/// The relocations a teleport will perform.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeleportPlan {
    /// Entities the actor controls, with their new positions.
    pub moves: Vec<EntityMove>,
    /// Entities left where they are because the actor does not own them.
    pub skipped: Vec<Uuid>,
}

/// Carries `position` from `source`'s frame into `destination`'s, keeping
/// its offset from the region origin.
#[must_use]
pub fn rebase(position: Point, source: &RegionRef, destination: &RegionRef) -> Point {
    position - source.origin + destination.origin
}

/// Plans moving every entity in `source` that `actor` owns to the same
/// offset inside `destination`.
#[must_use]
pub fn plan_teleport(
    source: &RegionRef,
    destination: &RegionRef,
    entities: &[EntityRef],
    actor: &Actor,
) -> TeleportPlan {
    let mut plan = TeleportPlan::default();
    for entity in entities {
        if entity.is_owned_by(actor) {
            plan.moves.push(EntityMove {
                entity_id: entity.id,
                from: entity.position,
                to: rebase(entity.position, source, destination),
            });
        } else {
            plan.skipped.push(entity.id);
        }
    }
    plan
}

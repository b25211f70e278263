//! Query handlers for the Region Groups context.
//!
//! This module contains query handlers that load groups from the registry
//! and return read-only view DTOs. Member names and origins are read from
//! the scene at query time.

use serde::Serialize;
use teleporter_core::error::DomainError;
use teleporter_core::geometry::Point;
use teleporter_core::registry::GroupRegistry;
use teleporter_core::scene::SceneStore;
use uuid::Uuid;

use crate::application::command_handlers::{load_current_group, refresh_members};
use crate::domain::aggregates::RegionGroup;

/// Read-only view of one group member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMemberView {
    /// Region identifier.
    pub id: Uuid,
    /// Region display name.
    pub name: String,
    /// Region origin.
    pub origin: Point,
}

/// Read-only view of a region group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    /// The group name.
    pub name: String,
    /// The owning scene.
    pub scene_id: Uuid,
    /// Members in group order.
    pub regions: Vec<GroupMemberView>,
}

impl From<&RegionGroup> for GroupView {
    fn from(group: &RegionGroup) -> Self {
        Self {
            name: group.name().to_owned(),
            scene_id: group.scene_id(),
            regions: group
                .regions()
                .map(|r| GroupMemberView {
                    id: r.id,
                    name: r.name.clone(),
                    origin: r.origin,
                })
                .collect(),
        }
    }
}

/// Retrieves a single group.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the scene has no such group.
/// Returns `DomainError::Infrastructure` if the stored state is corrupt.
pub async fn get_group(
    scene_id: Uuid,
    name: &str,
    registry: &dyn GroupRegistry,
    store: &dyn SceneStore,
) -> Result<GroupView, DomainError> {
    let group = load_current_group(registry, store, scene_id, name).await?;
    Ok(GroupView::from(&group))
}

/// Retrieves every group of a scene, sorted by name.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if any stored state is corrupt or
/// the registry fails.
pub async fn list_groups(
    scene_id: Uuid,
    registry: &dyn GroupRegistry,
    store: &dyn SceneStore,
) -> Result<Vec<GroupView>, DomainError> {
    let mut views = Vec::new();
    for stored in registry.list(scene_id).await? {
        let mut group = RegionGroup::from_state(stored.state)?;
        refresh_members(&mut group, store).await?;
        views.push(GroupView::from(&group));
    }
    views.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(views)
}

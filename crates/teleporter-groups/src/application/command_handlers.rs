//! Command handlers for the Region Groups context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the group, execute the command, write the
//! group back. Writes are read-modify-write against the registry with
//! last-write-wins semantics; two actors mutating the same group at once may
//! lose one of the updates.

use std::collections::HashSet;

use teleporter_core::actor::Actor;
use teleporter_core::command::Command;
use teleporter_core::document::{DocumentKind, ResolvedDocument};
use teleporter_core::error::DomainError;
use teleporter_core::notify::NotificationSink;
use teleporter_core::registry::{GroupRegistry, StoredGroup};
use teleporter_core::scene::{RegionRef, SceneStore};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::aggregates::RegionGroup;
use crate::domain::commands::{
    ClearGroups, CreateGroup, InsertRegion, MoveRegion, RemoveRegion, ReorderGroup, SwapRegions,
    ValidateGroup,
};

/// Result of a successfully handled group mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCommandResult {
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
    /// Member ids in their new order.
    pub order: Vec<Uuid>,
}

impl GroupCommandResult {
    fn of(group: &RegionGroup) -> Self {
        Self {
            scene_id: group.scene_id(),
            group: group.name().to_owned(),
            order: group.order().to_vec(),
        }
    }
}

/// Outcome of pruning a group.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// The group after pruning.
    pub result: GroupCommandResult,
    /// Ids dropped because their regions no longer exist.
    pub removed: Vec<Uuid>,
}

impl ValidationReport {
    /// Number of members dropped.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Loads a group from the registry.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the scene has no group named `name`.
/// Returns `DomainError::Infrastructure` if the stored state is corrupt or
/// the registry fails.
pub async fn load_group(
    registry: &dyn GroupRegistry,
    scene_id: Uuid,
    name: &str,
) -> Result<RegionGroup, DomainError> {
    let stored = registry.get(scene_id, name).await?.ok_or_else(|| {
        DomainError::NotFound(format!("\"{name}\" is not a valid group in scene {scene_id}"))
    })?;
    RegionGroup::from_state(stored.state)
}

/// Loads a group and refreshes each member's name and origin from the
/// scene. Members the scene no longer has keep their stored copy until the
/// group is validated.
///
/// # Errors
///
/// Propagates the errors of `load_group` and of the scene store.
pub async fn load_current_group(
    registry: &dyn GroupRegistry,
    store: &dyn SceneStore,
    scene_id: Uuid,
    name: &str,
) -> Result<RegionGroup, DomainError> {
    let mut group = load_group(registry, scene_id, name).await?;
    refresh_members(&mut group, store).await?;
    Ok(group)
}

/// Replaces every member's stored copy with the scene's current one.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the scene store fails.
pub async fn refresh_members(
    group: &mut RegionGroup,
    store: &dyn SceneStore,
) -> Result<(), DomainError> {
    for id in group.order().to_vec() {
        if let Some(region) = store.fetch_region(id).await? {
            group.refresh(region);
        }
    }
    Ok(())
}

async fn save_group(registry: &dyn GroupRegistry, group: &RegionGroup) -> Result<(), DomainError> {
    registry
        .set(StoredGroup {
            scene_id: group.scene_id(),
            name: group.name().to_owned(),
            state: group.to_state()?,
        })
        .await
}

/// Resolves `id` and checks that it names a region.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the identifier does not resolve and
/// `DomainError::Validation` if it resolves to something other than a region.
pub async fn resolve_region(
    store: &dyn SceneStore,
    id: Uuid,
) -> Result<ResolvedDocument, DomainError> {
    let resolved = store
        .resolve(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("identifier {id} does not resolve")))?;
    if resolved.kind != DocumentKind::Region {
        return Err(DomainError::Validation(format!(
            "\"{id}\" is a {} identifier, not a region",
            resolved.kind
        )));
    }
    Ok(resolved)
}

async fn fetch_region(store: &dyn SceneStore, id: Uuid) -> Result<RegionRef, DomainError> {
    resolve_region(store, id).await?;
    store
        .fetch_region(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("region {id}")))
}

/// Handles the `CreateGroup` command: resolves every region, builds the
/// group, and registers it.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank, taken, or a
/// region is not a region of the scene. Returns `DomainError::NotFound` if
/// an identifier does not resolve.
pub async fn handle_create_group(
    command: &CreateGroup,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    if command.name.trim().is_empty() {
        return Err(DomainError::Validation("group name is required".into()));
    }
    if registry.get(command.scene_id, &command.name).await?.is_some() {
        return Err(DomainError::Validation(format!(
            "group \"{}\" already exists in scene {}",
            command.name, command.scene_id
        )));
    }

    let mut regions = Vec::with_capacity(command.region_ids.len());
    for id in &command.region_ids {
        regions.push(fetch_region(store, *id).await?);
    }

    let group = RegionGroup::create(&command.name, command.scene_id, regions)?;
    save_group(registry, &group).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        scene_id = %group.scene_id(),
        group = group.name(),
        members = group.len(),
        "created region group"
    );

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `InsertRegion` command. When the region's scene has no group
/// of that name yet, a new group holding only this region is created.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the region is already a member or is
/// not a region. Returns `DomainError::NotFound` if it does not resolve.
pub async fn handle_insert_region(
    command: &InsertRegion,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    let region = fetch_region(store, command.region_id).await?;
    let scene_id = region.scene_id;

    let group = match registry.get(scene_id, &command.group).await? {
        None => {
            debug!(%scene_id, group = %command.group, "group absent, creating it");
            RegionGroup::create(&command.group, scene_id, [region])?
        }
        Some(stored) => {
            let mut group = RegionGroup::from_state(stored.state)?;
            let position = group.insert(region, command.index)?;
            debug!(%scene_id, group = %command.group, position, "inserted region");
            group
        }
    };
    save_group(registry, &group).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        region_id = %command.region_id,
        group = group.name(),
        "region inserted into group"
    );

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `RemoveRegion` command. Removing a region that is not a
/// member succeeds without writing.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the region does not resolve or the
/// group does not exist.
pub async fn handle_remove_region(
    command: &RemoveRegion,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    let resolved = resolve_region(store, command.region_id).await?;
    let mut group = load_group(registry, resolved.scene_id, &command.group).await?;

    if group.remove(&resolved)? {
        save_group(registry, &group).await?;
        info!(
            correlation_id = %command.correlation_id(),
            command = command.command_type(),
            region_id = %command.region_id,
            group = group.name(),
            "region removed from group"
        );
    } else {
        debug!(region_id = %command.region_id, group = group.name(), "region was not a member");
    }

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `ClearGroups` command: unsets one registry entry, or all of
/// them when no group is named.
///
/// # Errors
///
/// Returns `DomainError` if the registry fails.
pub async fn handle_clear_groups(
    command: &ClearGroups,
    registry: &dyn GroupRegistry,
) -> Result<(), DomainError> {
    match &command.group {
        Some(name) => registry.unset(command.scene_id, name).await?,
        None => registry.unset_all(command.scene_id).await?,
    }

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        scene_id = %command.scene_id,
        group = command.group.as_deref().unwrap_or("*"),
        "cleared region groups"
    );

    Ok(())
}

/// Handles the `SwapRegions` command.
///
/// # Errors
///
/// Returns `DomainError::Index` if either position is out of range and
/// `DomainError::NotFound` if the group does not exist.
pub async fn handle_swap_regions(
    command: &SwapRegions,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    let mut group = load_group(registry, command.scene_id, &command.group).await?;
    group.swap(command.first, command.second)?;
    save_group(registry, &group).await?;

    debug!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        group = group.name(),
        first = command.first,
        second = command.second,
        "swapped group members"
    );

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `MoveRegion` command.
///
/// # Errors
///
/// Returns `DomainError::Index` if either position is out of range and
/// `DomainError::NotFound` if the group does not exist.
pub async fn handle_move_region(
    command: &MoveRegion,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    let mut group = load_group(registry, command.scene_id, &command.group).await?;
    group.move_member(command.from, command.to)?;
    save_group(registry, &group).await?;

    debug!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        group = group.name(),
        from = command.from,
        to = command.to,
        "moved group member"
    );

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `ReorderGroup` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `new_order` is not a permutation of
/// the group's positions and `DomainError::NotFound` if the group does not
/// exist.
pub async fn handle_reorder_group(
    command: &ReorderGroup,
    registry: &dyn GroupRegistry,
) -> Result<GroupCommandResult, DomainError> {
    let mut group = load_group(registry, command.scene_id, &command.group).await?;
    group.reorder(&command.new_order)?;
    save_group(registry, &group).await?;

    debug!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        group = group.name(),
        "reordered group"
    );

    Ok(GroupCommandResult::of(&group))
}

/// Handles the `ValidateGroup` command: drops members whose regions are gone
/// from the scene, writes the group back if anything changed, and warns
/// elevated actors once per dropped member.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the group does not exist.
pub async fn handle_validate_group(
    command: &ValidateGroup,
    actor: &Actor,
    store: &dyn SceneStore,
    registry: &dyn GroupRegistry,
    notifier: &dyn NotificationSink,
) -> Result<ValidationReport, DomainError> {
    let mut group = load_group(registry, command.scene_id, &command.group).await?;
    let live: HashSet<Uuid> = store.region_ids(command.scene_id).await?.into_iter().collect();

    let removed = group.validate(&live);
    if !removed.is_empty() {
        save_group(registry, &group).await?;
    }

    if actor.elevated {
        for id in &removed {
            notifier.warn(&format!(
                "Removed invalid region {id} from teleporter group \"{}\"",
                group.name()
            ));
        }
    }

    info!(
        correlation_id = %command.correlation_id(),
        command = command.command_type(),
        group = group.name(),
        removed = removed.len(),
        "validated region group"
    );

    Ok(ValidationReport {
        result: GroupCommandResult::of(&group),
        removed,
    })
}

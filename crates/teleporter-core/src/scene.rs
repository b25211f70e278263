//! Scene data port: regions, entities, and identifier resolution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;
use crate::document::ResolvedDocument;
use crate::error::DomainError;
use crate::geometry::Point;

/// A region as seen by the core: a named area with an origin point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRef {
    /// Region identifier.
    pub id: Uuid,
    /// The scene the region belongs to.
    pub scene_id: Uuid,
    /// Display name.
    pub name: String,
    /// Axis-aligned origin.
    pub origin: Point,
}

/// An entity (token) placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity identifier.
    pub id: Uuid,
    /// The scene the entity is placed in.
    pub scene_id: Uuid,
    /// Display name.
    pub name: String,
    /// Position on the horizontal plane.
    pub position: Point,
    /// Vertical elevation.
    pub elevation: f64,
    /// Actors allowed to control the entity.
    pub owners: Vec<Uuid>,
}

impl EntityRef {
    /// Returns `true` if `actor` may control this entity.
    ///
    /// Elevated actors own every entity.
    #[must_use]
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        actor.elevated || self.owners.contains(&actor.id)
    }
}

/// Options accompanying a positional update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOptions {
    /// Suppress movement animation; the entity jumps to its new position.
    pub teleport: bool,
    /// The region the entity ends up in, when the caller knows it.
    pub region_id: Option<Uuid>,
}

/// Host-owned scene data.
#[async_trait]
pub trait SceneStore: Send + Sync {
    /// Resolves an identifier to its kind and owning scene without
    /// fetching the document.
    async fn resolve(&self, id: Uuid) -> Result<Option<ResolvedDocument>, DomainError>;

    /// Fetches a region, or `None` if it no longer exists.
    async fn fetch_region(&self, id: Uuid) -> Result<Option<RegionRef>, DomainError>;

    /// Lists the identifiers of every region currently in `scene_id`.
    async fn region_ids(&self, scene_id: Uuid) -> Result<Vec<Uuid>, DomainError>;

    /// Fetches an entity, or `None` if it no longer exists.
    async fn fetch_entity(&self, id: Uuid) -> Result<Option<EntityRef>, DomainError>;

    /// Lists the entities currently inside a region.
    async fn entities_in_region(&self, region_id: Uuid) -> Result<Vec<EntityRef>, DomainError>;

    /// Writes a new position for an entity.
    async fn update_entity_position(
        &self,
        entity_id: Uuid,
        position: Point,
        options: UpdateOptions,
    ) -> Result<(), DomainError>;

    /// Writes a new elevation for an entity.
    async fn update_entity_elevation(
        &self,
        entity_id: Uuid,
        elevation: f64,
    ) -> Result<(), DomainError>;
}

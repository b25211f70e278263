//! In-memory scene store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use teleporter_core::document::{DocumentKind, ResolvedDocument};
use teleporter_core::error::DomainError;
use teleporter_core::geometry::Point;
use teleporter_core::scene::{EntityRef, RegionRef, SceneStore, UpdateOptions};
use uuid::Uuid;

#[derive(Debug, Default)]
struct SceneState {
    regions: HashMap<Uuid, RegionRef>,
    entities: HashMap<Uuid, EntityRef>,
    /// Entity id to the region it currently stands in.
    placements: HashMap<Uuid, Uuid>,
    position_writes: Vec<(Uuid, Point, UpdateOptions)>,
    elevation_writes: Vec<(Uuid, f64)>,
}

/// A scene store held in memory. Records every write it receives.
#[derive(Debug, Default)]
pub struct InMemorySceneStore {
    state: Mutex<SceneState>,
}

impl InMemorySceneStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_region(&self, scene_id: Uuid, name: &str, origin: Point) -> RegionRef {
        let region = RegionRef {
            id: Uuid::new_v4(),
            scene_id,
            name: name.to_owned(),
            origin,
        };
        self.state
            .lock()
            .unwrap()
            .regions
            .insert(region.id, region.clone());
        region
    }

    /// Renames and moves a region, as if the host had edited it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn edit_region(&self, region_id: Uuid, name: &str, origin: Point) {
        if let Some(region) = self.state.lock().unwrap().regions.get_mut(&region_id) {
            region.name = name.to_owned();
            region.origin = origin;
        }
    }

    /// Deletes a region, as if the host had removed it from its scene.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn delete_region(&self, region_id: Uuid) {
        let mut state = self.state.lock().unwrap();
        state.regions.remove(&region_id);
        state.placements.retain(|_, region| *region != region_id);
    }

    /// Places a new entity inside `region` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn place_entity(
        &self,
        region: &RegionRef,
        name: &str,
        position: Point,
        owners: Vec<Uuid>,
    ) -> EntityRef {
        let entity = EntityRef {
            id: Uuid::new_v4(),
            scene_id: region.scene_id,
            name: name.to_owned(),
            position,
            elevation: 0.0,
            owners,
        };
        let mut state = self.state.lock().unwrap();
        state.entities.insert(entity.id, entity.clone());
        state.placements.insert(entity.id, region.id);
        entity
    }

    /// Sets an entity's elevation without recording a write.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set_elevation(&self, entity_id: Uuid, elevation: f64) {
        if let Some(entity) = self.state.lock().unwrap().entities.get_mut(&entity_id) {
            entity.elevation = elevation;
        }
    }

    /// Returns the current state of an entity.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn entity(&self, entity_id: Uuid) -> Option<EntityRef> {
        self.state.lock().unwrap().entities.get(&entity_id).cloned()
    }

    /// Every positional write received, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn position_writes(&self) -> Vec<(Uuid, Point, UpdateOptions)> {
        self.state.lock().unwrap().position_writes.clone()
    }

    /// Every elevation write received, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn elevation_writes(&self) -> Vec<(Uuid, f64)> {
        self.state.lock().unwrap().elevation_writes.clone()
    }
}

#[async_trait]
impl SceneStore for InMemorySceneStore {
    async fn resolve(&self, id: Uuid) -> Result<Option<ResolvedDocument>, DomainError> {
        let state = self.state.lock().unwrap();
        if let Some(region) = state.regions.get(&id) {
            return Ok(Some(ResolvedDocument {
                kind: DocumentKind::Region,
                scene_id: region.scene_id,
                local_id: id,
            }));
        }
        if let Some(entity) = state.entities.get(&id) {
            return Ok(Some(ResolvedDocument {
                kind: DocumentKind::Entity,
                scene_id: entity.scene_id,
                local_id: id,
            }));
        }
        let is_scene = state.regions.values().any(|r| r.scene_id == id)
            || state.entities.values().any(|e| e.scene_id == id);
        Ok(is_scene.then_some(ResolvedDocument {
            kind: DocumentKind::Scene,
            scene_id: id,
            local_id: id,
        }))
    }

    async fn fetch_region(&self, id: Uuid) -> Result<Option<RegionRef>, DomainError> {
        Ok(self.state.lock().unwrap().regions.get(&id).cloned())
    }

    async fn region_ids(&self, scene_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .regions
            .values()
            .filter(|r| r.scene_id == scene_id)
            .map(|r| r.id)
            .collect())
    }

    async fn fetch_entity(&self, id: Uuid) -> Result<Option<EntityRef>, DomainError> {
        Ok(self.entity(id))
    }

    async fn entities_in_region(&self, region_id: Uuid) -> Result<Vec<EntityRef>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut inside: Vec<EntityRef> = state
            .placements
            .iter()
            .filter(|(_, region)| **region == region_id)
            .filter_map(|(entity, _)| state.entities.get(entity).cloned())
            .collect();
        inside.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(inside)
    }

    async fn update_entity_position(
        &self,
        entity_id: Uuid,
        position: Point,
        options: UpdateOptions,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let Some(entity) = state.entities.get_mut(&entity_id) else {
            return Err(DomainError::NotFound(format!("entity {entity_id}")));
        };
        entity.position = position;
        if let Some(region_id) = options.region_id {
            state.placements.insert(entity_id, region_id);
        }
        state.position_writes.push((entity_id, position, options));
        Ok(())
    }

    async fn update_entity_elevation(
        &self,
        entity_id: Uuid,
        elevation: f64,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let Some(entity) = state.entities.get_mut(&entity_id) else {
            return Err(DomainError::NotFound(format!("entity {entity_id}")));
        };
        entity.elevation = elevation;
        state.elevation_writes.push((entity_id, elevation));
        Ok(())
    }
}

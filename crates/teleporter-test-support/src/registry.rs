//! Test registries: mock `GroupRegistry` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use teleporter_core::error::DomainError;
use teleporter_core::registry::{GroupRegistry, StoredGroup};
use uuid::Uuid;

/// A registry held in memory. Records how many writes it has accepted.
#[derive(Debug, Default)]
pub struct InMemoryGroupRegistry {
    groups: Mutex<HashMap<(Uuid, String), StoredGroup>>,
    writes: Mutex<usize>,
}

impl InMemoryGroupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of a stored entry without going through the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self, scene_id: Uuid, name: &str) -> Option<StoredGroup> {
        self.groups
            .lock()
            .unwrap()
            .get(&(scene_id, name.to_owned()))
            .cloned()
    }

    /// Number of `set` calls accepted so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl GroupRegistry for InMemoryGroupRegistry {
    async fn get(&self, scene_id: Uuid, name: &str) -> Result<Option<StoredGroup>, DomainError> {
        Ok(self.stored(scene_id, name))
    }

    async fn list(&self, scene_id: Uuid) -> Result<Vec<StoredGroup>, DomainError> {
        let mut groups: Vec<StoredGroup> = self
            .groups
            .lock()
            .unwrap()
            .values()
            .filter(|g| g.scene_id == scene_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }

    async fn set(&self, group: StoredGroup) -> Result<(), DomainError> {
        self.groups
            .lock()
            .unwrap()
            .insert((group.scene_id, group.name.clone()), group);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn unset(&self, scene_id: Uuid, name: &str) -> Result<(), DomainError> {
        self.groups
            .lock()
            .unwrap()
            .remove(&(scene_id, name.to_owned()));
        Ok(())
    }

    async fn unset_all(&self, scene_id: Uuid) -> Result<(), DomainError> {
        self.groups
            .lock()
            .unwrap()
            .retain(|(scene, _), _| *scene != scene_id);
        Ok(())
    }
}

/// A registry that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingGroupRegistry;

#[async_trait]
impl GroupRegistry for FailingGroupRegistry {
    async fn get(&self, _scene_id: Uuid, _name: &str) -> Result<Option<StoredGroup>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self, _scene_id: Uuid) -> Result<Vec<StoredGroup>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn set(&self, _group: StoredGroup) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn unset(&self, _scene_id: Uuid, _name: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn unset_all(&self, _scene_id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

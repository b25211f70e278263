//! Group registry abstraction.
//!
//! The registry is a per-scene key-value store keyed by group name. Values
//! are opaque serialized group state; the groups context owns the format.
//! Writes are last-write-wins: concurrent read-modify-write cycles on the
//! same group may lose an update.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a region group.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGroup {
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// Group name, unique within the scene.
    pub name: String,
    /// Serialized group state.
    pub state: serde_json::Value,
}

/// Repository trait for reading and writing region groups.
#[async_trait]
pub trait GroupRegistry: Send + Sync {
    /// Loads a single named group.
    async fn get(&self, scene_id: Uuid, name: &str) -> Result<Option<StoredGroup>, DomainError>;

    /// Loads every group registered for a scene.
    async fn list(&self, scene_id: Uuid) -> Result<Vec<StoredGroup>, DomainError>;

    /// Creates or replaces a group entry.
    async fn set(&self, group: StoredGroup) -> Result<(), DomainError>;

    /// Removes a single named group. Removing an absent entry is not an error.
    async fn unset(&self, scene_id: Uuid, name: &str) -> Result<(), DomainError>;

    /// Removes every group registered for a scene.
    async fn unset_all(&self, scene_id: Uuid) -> Result<(), DomainError>;
}

//! Shared application state.

use std::sync::Arc;

use teleporter_core::clock::Clock;
use teleporter_core::notify::NotificationSink;
use teleporter_core::registry::GroupRegistry;
use teleporter_core::scene::SceneStore;

use crate::prompt_hub::PromptHub;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Host scene data.
    pub scene_store: Arc<dyn SceneStore>,
    /// Per-scene group storage.
    pub group_registry: Arc<dyn GroupRegistry>,
    /// Prompts waiting for an actor's answer.
    pub prompts: Arc<PromptHub>,
    /// Where user-facing warnings go.
    pub notifier: Arc<dyn NotificationSink>,
}

impl AppState {
    /// Create new application state. Prompts are stamped with `clock`.
    #[must_use]
    pub fn new(
        scene_store: Arc<dyn SceneStore>,
        group_registry: Arc<dyn GroupRegistry>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            scene_store,
            group_registry,
            prompts: Arc::new(PromptHub::new(clock)),
            notifier,
        }
    }
}

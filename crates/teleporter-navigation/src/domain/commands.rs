//! Commands for the Navigation context.

use teleporter_core::command::Command;
use uuid::Uuid;

use super::selection::SelectionRequest;

/// Command to ask an actor for a destination and teleport there.
#[derive(Debug, Clone)]
pub struct PromptTeleport {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to ask.
    pub request: SelectionRequest,
}

impl Command for PromptTeleport {
    fn command_type(&self) -> &'static str {
        "navigation.prompt_teleport"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move the actor's entities between two known regions.
#[derive(Debug, Clone)]
pub struct ApplyTeleport {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The region the entities are standing in.
    pub source_region_id: Uuid,
    /// The region to move them to.
    pub destination_region_id: Uuid,
}

impl Command for ApplyTeleport {
    fn command_type(&self) -> &'static str {
        "navigation.apply_teleport"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

//! Commands for the Region Groups context.

use teleporter_core::command::Command;
use uuid::Uuid;

/// Name used when a caller does not address a group explicitly.
pub const DEFAULT_GROUP: &str = "default";

/// Command to create a new group from a list of regions.
#[derive(Debug, Clone)]
pub struct CreateGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub name: String,
    /// Initial members, in order. Duplicates are dropped.
    pub region_ids: Vec<Uuid>,
}

impl Command for CreateGroup {
    fn command_type(&self) -> &'static str {
        "groups.create_group"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to insert a region into a group, creating the group if needed.
#[derive(Debug, Clone)]
pub struct InsertRegion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The region to insert. Its scene selects the registry.
    pub region_id: Uuid,
    /// The group name.
    pub group: String,
    /// Target position; `None` appends.
    pub index: Option<usize>,
}

impl Command for InsertRegion {
    fn command_type(&self) -> &'static str {
        "groups.insert_region"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a region from a group.
#[derive(Debug, Clone)]
pub struct RemoveRegion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The region to remove. Its scene selects the registry.
    pub region_id: Uuid,
    /// The group name.
    pub group: String,
}

impl Command for RemoveRegion {
    fn command_type(&self) -> &'static str {
        "groups.remove_region"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to clear one group, or every group, of a scene.
#[derive(Debug, Clone)]
pub struct ClearGroups {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene whose registry is cleared.
    pub scene_id: Uuid,
    /// The group to clear; `None` clears all of them.
    pub group: Option<String>,
}

impl Command for ClearGroups {
    fn command_type(&self) -> &'static str {
        "groups.clear_groups"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to exchange two members of a group.
#[derive(Debug, Clone)]
pub struct SwapRegions {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
    /// First position.
    pub first: usize,
    /// Second position.
    pub second: usize,
}

impl Command for SwapRegions {
    fn command_type(&self) -> &'static str {
        "groups.swap_regions"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move one member of a group to a new position.
#[derive(Debug, Clone)]
pub struct MoveRegion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
    /// Current position.
    pub from: usize,
    /// Target position.
    pub to: usize,
}

impl Command for MoveRegion {
    fn command_type(&self) -> &'static str {
        "groups.move_region"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to rearrange a group by a permutation of its positions.
#[derive(Debug, Clone)]
pub struct ReorderGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
    /// Position `k` of the result takes the member at `new_order[k]`.
    pub new_order: Vec<usize>,
}

impl Command for ReorderGroup {
    fn command_type(&self) -> &'static str {
        "groups.reorder_group"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to prune members whose regions no longer exist.
#[derive(Debug, Clone)]
pub struct ValidateGroup {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The scene the group belongs to.
    pub scene_id: Uuid,
    /// The group name.
    pub group: String,
}

impl Command for ValidateGroup {
    fn command_type(&self) -> &'static str {
        "groups.validate_group"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

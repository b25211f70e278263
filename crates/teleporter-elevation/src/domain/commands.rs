//! Commands for the Elevation context.

use teleporter_core::command::Command;
use uuid::Uuid;

use super::shifter::ElevationPolicy;

/// Command to shift an entity's elevation between two reference heights.
#[derive(Debug, Clone)]
pub struct ShiftElevation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity to shift.
    pub entity_id: Uuid,
    /// Upper reference height.
    pub top: f64,
    /// Lower reference height.
    pub bottom: f64,
    /// How to respond.
    pub policy: ElevationPolicy,
}

impl Command for ShiftElevation {
    fn command_type(&self) -> &'static str {
        "elevation.shift_elevation"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

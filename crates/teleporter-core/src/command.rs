//! Command abstractions.
//!
//! Every mutation entering a bounded context is a command value. Handlers
//! log its type and correlation id so one HTTP request can be followed
//! through group, navigation, and elevation handlers.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted `context.action` name, e.g. `groups.insert_region`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID shared by every log line the command produces.
    fn correlation_id(&self) -> Uuid;

    /// The bounded context prefix of `command_type`.
    fn context(&self) -> &'static str {
        let name = self.command_type();
        name.split_once('.').map_or(name, |(context, _)| context)
    }
}

//! Notification sink that writes warnings to the log.

use teleporter_core::notify::NotificationSink;
use tracing::warn;

/// Forwards warnings to `tracing` at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn warn(&self, message: &str) {
        warn!(notification = message, "user-facing warning");
    }
}

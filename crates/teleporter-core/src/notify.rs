//! Notification sink for human-readable warnings.

/// Receives warnings meant for a privileged operator.
pub trait NotificationSink: Send + Sync {
    /// Delivers a warning message.
    fn warn(&self, message: &str);
}

//! Recording notification sink.

use std::sync::Mutex;

use teleporter_core::notify::NotificationSink;

/// A sink that keeps every warning it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warnings received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_owned());
    }
}

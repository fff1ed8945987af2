//! Driven port for blocking user-visible alerts.

use std::sync::{Mutex, PoisonError};

/// Port for showing a message the user must acknowledge.
#[cfg_attr(test, mockall::automock)]
pub trait UserNotifier: Send + Sync {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Notifier that keeps every alert for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UserNotifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

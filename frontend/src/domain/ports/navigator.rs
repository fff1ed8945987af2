//! Driven port for moving the browsing context.

use std::sync::{Mutex, PoisonError};

/// One navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// Replace the current location.
    SameTab(String),
    /// Open in a new tab or window.
    NewTab(String),
}

/// Port for redirecting the user.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replace the current location with `location`.
    fn navigate(&self, location: &str);

    /// Open `url` in a new tab, keeping the current location.
    fn open_in_new_tab(&self, url: &str);
}

/// Navigator that records every request instead of acting on it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Visit>>,
}

impl RecordingNavigator {
    /// Every recorded visit, oldest first.
    pub fn visits(&self) -> Vec<Visit> {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Location of the most recent same-tab navigation.
    pub fn current_location(&self) -> Option<String> {
        self.visits().into_iter().rev().find_map(|visit| match visit {
            Visit::SameTab(location) => Some(location),
            Visit::NewTab(_) => None,
        })
    }

    fn record(&self, visit: Visit) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(visit);
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, location: &str) {
        self.record(Visit::SameTab(location.to_owned()));
    }

    fn open_in_new_tab(&self, url: &str) {
        self.record(Visit::NewTab(url.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tabs_do_not_change_the_current_location() {
        let navigator = RecordingNavigator::default();
        navigator.navigate("/home");
        navigator.open_in_new_tab("https://wa.me/1?text=Hello");
        assert_eq!(navigator.current_location().as_deref(), Some("/home"));
        assert_eq!(navigator.visits().len(), 2);
    }
}

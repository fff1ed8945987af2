//! Driven port for the client-held session.
//!
//! Callers never see a half-written session: `set` and `clear` act on all
//! three session keys at once, and adapters report a partially stored
//! record as absent.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::define_port_error;
use crate::domain::Session;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Backing storage could not be read.
        Read {
            /// Underlying failure.
            message: String,
        } => "session store read failed: {message}",
        /// Backing storage could not be written.
        Write {
            /// Underlying failure.
            message: String,
        } => "session store write failed: {message}",
    }
}

/// Port for reading and replacing the current session.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Return the current session, or `None` when anonymous.
    fn get(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Replace the stored session with `session`.
    fn set(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Decode stored entries, treating a partial record as anonymous.
pub(crate) fn session_from_entries(entries: &BTreeMap<String, String>) -> Option<Session> {
    match Session::from_entries(entries) {
        Ok(session) => session,
        Err(error) => {
            warn!(%error, "ignoring incoherent stored session");
            None
        }
    }
}

/// In-memory store keyed like browser local storage.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::ports::{InMemorySessionStore, SessionStore};
/// use carlux_frontend::domain::{Session, UserId};
///
/// let store = InMemorySessionStore::default();
/// store.set(&Session::new(UserId::new("7").unwrap(), "Ana", "a@b.com")).unwrap();
/// assert_eq!(store.entries().get("userId").map(String::as_str), Some("7"));
/// store.clear().unwrap();
/// assert!(store.entries().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemorySessionStore {
    /// Start with `session` already stored.
    pub fn with_session(session: &Session) -> Self {
        Self {
            entries: Mutex::new(session.to_entries()),
        }
    }

    /// Raw key/value pairs currently stored.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(session_from_entries(&self.entries()))
    }

    fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = session.to_entries();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

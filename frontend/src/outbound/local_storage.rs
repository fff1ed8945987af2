//! File-backed session store.
//!
//! The session lives in one JSON object file, keyed like browser local
//! storage. Writes go to a staging file that is renamed over the target, so
//! readers see either the previous record or the new one.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::Session;
use crate::domain::ports::{SessionStore, SessionStoreError, session_from_entries};

/// File name of the stored session inside the session directory.
pub const SESSION_FILENAME: &str = "session.json";
const STAGING_FILENAME: &str = ".session.json.tmp";

/// Session store persisting to `<dir>/session.json`.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    dir: Dir,
    root: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileSessionStore {
    /// Open (creating when absent) the session directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Write`] when the directory cannot be
    /// created or opened.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let root = directory.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(|error| SessionStoreError::write(describe(root, &error)))?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|error| SessionStoreError::write(describe(root, &error)))?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
            guard: Mutex::new(()),
        })
    }

    /// Path of the session file.
    pub fn path(&self) -> PathBuf {
        self.root.join(SESSION_FILENAME)
    }

    /// Raw stored entries; empty when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Read`] when the file exists but cannot be
    /// read or is not a JSON object of strings.
    pub fn entries(&self) -> Result<BTreeMap<String, String>, SessionStoreError> {
        let _held = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_entries()
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionStoreError> {
        let contents = match self.dir.read_to_string(SESSION_FILENAME) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(SessionStoreError::read(describe(&self.path(), &error))),
        };
        serde_json::from_str(&contents).map_err(|error| {
            SessionStoreError::read(format!(
                "{}: invalid session JSON: {error}",
                self.path().display()
            ))
        })
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self) -> Result<Option<Session>, SessionStoreError> {
        let entries = self.entries()?;
        Ok(session_from_entries(&entries))
    }

    fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_vec_pretty(&session.to_entries())
            .map_err(|error| SessionStoreError::write(error.to_string()))?;
        let _held = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.dir
            .write(STAGING_FILENAME, payload)
            .map_err(|error| SessionStoreError::write(describe(&self.path(), &error)))?;
        self.dir
            .rename(STAGING_FILENAME, &self.dir, SESSION_FILENAME)
            .map_err(|error| SessionStoreError::write(describe(&self.path(), &error)))?;
        debug!(path = %self.path().display(), "session stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let _held = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        match self.dir.remove_file(SESSION_FILENAME) {
            Ok(()) => {
                debug!(path = %self.path().display(), "session cleared");
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionStoreError::write(describe(&self.path(), &error))),
        }
    }
}

fn describe(path: &Path, error: &io::Error) -> String {
    format!("{}: {error}", path.display())
}

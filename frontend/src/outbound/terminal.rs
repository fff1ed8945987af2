//! Terminal stand-ins for browser alerts and navigation.
//!
//! Both adapters write one line per event to the supplied sink (stderr in
//! the CLI) and keep the last same-tab location so callers can report it.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::{Navigator, UserNotifier};

type Sink = Mutex<Box<dyn Write + Send>>;

fn emit(sink: &Sink, line: &str) {
    let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(error) = writeln!(writer, "{line}") {
        warn!(%error, "failed to write terminal output");
    }
}

/// Notifier printing `alert: <message>` lines.
pub struct TerminalNotifier {
    sink: Sink,
}

impl TerminalNotifier {
    /// Notifier writing to standard error.
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Notifier writing to `writer`.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }
}

impl UserNotifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        emit(&self.sink, &format!("alert: {message}"));
    }
}

/// Navigator printing `navigate: <location>` and `open: <url>` lines.
pub struct TerminalNavigator {
    sink: Sink,
    location: Mutex<Option<String>>,
}

impl TerminalNavigator {
    /// Navigator writing to standard error.
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Navigator writing to `writer`.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            location: Mutex::new(None),
        }
    }

    /// Most recent same-tab location, if any.
    pub fn current_location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: &str) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = Some(location.to_owned());
        emit(&self.sink, &format!("navigate: {location}"));
    }

    fn open_in_new_tab(&self, url: &str) {
        emit(&self.sink, &format!("open: {url}"));
    }
}

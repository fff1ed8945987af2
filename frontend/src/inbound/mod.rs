//! Inbound adapters that turn UI triggers into domain calls.
//!
//! View binders live under [`view_binder`]; the CLI in `main.rs` is the
//! only driver that invokes them today.

pub mod view_binder;

pub use view_binder::{BookingForm, HOME_PATH, ViewBinder, ViewPorts, alerts};

//! Outbound adapters implementing domain ports for the native runtime.
//!
//! - **http**: reqwest-backed [`ApiTransport`](crate::domain::ports::ApiTransport)
//! - **local_storage**: JSON file session store opened through cap-std
//! - **document**: in-memory page that binders render into
//! - **terminal**: alerts and navigation written to stderr
//! - **geolocation**: fixed-position geolocator
//!
//! Adapters translate between domain types and their backing surface. They
//! contain no client policy.

pub mod document;
pub mod geolocation;
pub mod http;
pub mod local_storage;
pub mod terminal;

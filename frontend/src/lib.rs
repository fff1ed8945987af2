//! Client-side session and request-dispatch layer for the CarLux Service.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`]: session and coordinate types, the API client, the
//!   auth-error interceptor, location acquisition, and the port traits the
//!   browser surfaces are modelled behind.
//! - [`inbound`]: view binders that turn UI triggers into API calls and
//!   render structured results into a page.
//! - [`outbound`]: adapters for HTTP, file-backed local storage, the
//!   in-memory document, and terminal alerts and navigation.
//! - [`config`]: settings loaded through OrthoConfig.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

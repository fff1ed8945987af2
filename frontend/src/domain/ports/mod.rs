//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each browser surface the client depends on (local storage, `fetch`,
//! `window.location`, `alert`, geolocation, the DOM) sits behind one trait
//! here, so the API client and view binders can be exercised with fakes.

mod macros;
pub(crate) use macros::define_port_error;

mod api_transport;
mod geolocator;
mod navigator;
mod page;
mod session_store;
mod user_notifier;

#[cfg(test)]
pub use api_transport::MockApiTransport;
pub use api_transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, UNAUTHORIZED_STATUS};
#[cfg(test)]
pub use geolocator::MockGeolocator;
pub use geolocator::{GeolocationError, Geolocator};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{Navigator, RecordingNavigator, Visit};
#[cfg(test)]
pub use page::MockPage;
pub use page::{Page, PageError};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub(crate) use session_store::session_from_entries;
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_notifier::MockUserNotifier;
pub use user_notifier::{RecordingNotifier, UserNotifier};

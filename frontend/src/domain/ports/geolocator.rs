//! Driven port for one-shot device position requests.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Coordinate;

define_port_error! {
    /// Reasons a position request produced no coordinate.
    pub enum GeolocationError {
        /// The environment has no geolocation capability.
        Unsupported =>
            "geolocation is not supported",
        /// The user or platform refused the request.
        Denied {
            /// Platform explanation.
            message: String,
        } => "geolocation permission denied: {message}",
        /// The position could not be determined.
        Unavailable {
            /// Platform explanation.
            message: String,
        } => "position unavailable: {message}",
    }
}

/// Port for requesting the device's current position once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolve the current position.
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

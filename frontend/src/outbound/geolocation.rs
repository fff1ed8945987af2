//! Geolocator answering with a configured position.

use async_trait::async_trait;

use crate::domain::Coordinate;
use crate::domain::ports::{GeolocationError, Geolocator};

/// Geolocator for hosts without positioning hardware.
///
/// With no configured position it behaves like a browser lacking the
/// geolocation API.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticGeolocator {
    position: Option<Coordinate>,
}

impl StaticGeolocator {
    /// Always report `position`.
    pub fn at(position: Coordinate) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Report `position` when present, otherwise act as unsupported.
    pub fn from_option(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.position.ok_or_else(GeolocationError::unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_position_is_reported() {
        let geolocator = StaticGeolocator::at(Coordinate::new(30.1, 31.3));
        assert_eq!(
            geolocator.current_position().await,
            Ok(Coordinate::new(30.1, 31.3))
        );
    }

    #[tokio::test]
    async fn no_position_means_unsupported() {
        let err = StaticGeolocator::default()
            .current_position()
            .await
            .expect_err("no position configured");
        assert_eq!(err, GeolocationError::Unsupported);
    }
}

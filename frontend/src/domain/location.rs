//! One-shot device location with a fixed fallback, and forwarding of the
//! acquired position to the backend.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{GeolocationError, Geolocator, SessionStore, UserNotifier};
use crate::domain::{CarServiceApi, Coordinate, FALLBACK_COORDINATE};

/// Alert shown when the environment cannot provide a position at all.
pub const GEOLOCATION_UNSUPPORTED_ALERT: &str =
    "Geolocation is not supported. Using default location.";

/// Alert shown when a position request was denied or failed.
pub const GEOLOCATION_FAILED_ALERT: &str =
    "Error getting your location. Default location will be used.";

/// Requests the device position once, falling back to
/// [`FALLBACK_COORDINATE`] after alerting the user.
#[derive(Clone)]
pub struct LocationAcquisition {
    geolocator: Arc<dyn Geolocator>,
    notifier: Arc<dyn UserNotifier>,
}

impl LocationAcquisition {
    /// Acquire through `geolocator`, alerting through `notifier`.
    pub fn new(geolocator: Arc<dyn Geolocator>, notifier: Arc<dyn UserNotifier>) -> Self {
        Self {
            geolocator,
            notifier,
        }
    }

    /// Resolve a coordinate. Never fails.
    pub async fn acquire(&self) -> Coordinate {
        match self.geolocator.current_position().await {
            Ok(position) => position,
            Err(GeolocationError::Unsupported) => {
                warn!("geolocation unsupported; using fallback coordinate");
                self.notifier.alert(GEOLOCATION_UNSUPPORTED_ALERT);
                FALLBACK_COORDINATE
            }
            Err(error) => {
                warn!(%error, "geolocation failed; using fallback coordinate");
                self.notifier.alert(GEOLOCATION_FAILED_ALERT);
                FALLBACK_COORDINATE
            }
        }
    }

    /// Acquire a coordinate and hand it to `continuation`.
    pub async fn acquire_then<F, Fut>(&self, continuation: F) -> Fut::Output
    where
        F: FnOnce(Coordinate) -> Fut,
        Fut: Future,
    {
        let position = self.acquire().await;
        continuation(position).await
    }
}

/// What happened to a position handed to
/// [`LocationReporter::send_location_to_backend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationReport {
    /// The backend stored the position.
    Saved,
    /// Nobody is signed in, so nothing was sent.
    SkippedAnonymous,
    /// The session could not be read or the request failed.
    Failed,
}

/// Forwards positions to the backend on behalf of the signed-in user.
#[derive(Clone)]
pub struct LocationReporter {
    api: CarServiceApi,
    sessions: Arc<dyn SessionStore>,
}

impl LocationReporter {
    /// Report through `api` for whoever `sessions` holds.
    pub fn new(api: CarServiceApi, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// Save `position` for the current user. Failures are logged only.
    pub async fn send_location_to_backend(&self, position: Coordinate) -> LocationReport {
        let session = match self.sessions.get() {
            Ok(Some(session)) => session,
            Ok(None) => {
                info!("no signed-in user; location not sent");
                return LocationReport::SkippedAnonymous;
            }
            Err(error) => {
                warn!(%error, "could not read session; location not sent");
                return LocationReport::Failed;
            }
        };

        match self.api.save_location(session.user_id(), position).await {
            Ok(_) => {
                info!(user_id = %session.user_id(), %position, "location saved");
                LocationReport::Saved
            }
            Err(error) => {
                warn!(%error, "failed to save location");
                LocationReport::Failed
            }
        }
    }

    /// Acquire a position and forward it.
    pub async fn share_location(&self, acquisition: &LocationAcquisition) -> LocationReport {
        acquisition
            .acquire_then(|position| self.send_location_to_backend(position))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthInterceptor;
    use crate::domain::ports::{
        ApiResponse, InMemorySessionStore, MockApiTransport, MockGeolocator, RecordingNavigator,
        RecordingNotifier,
    };
    use crate::domain::{Session, UserId};
    use rstest::rstest;
    use serde_json::json;

    fn geolocator(result: Result<Coordinate, GeolocationError>) -> Arc<MockGeolocator> {
        let mut geolocator = MockGeolocator::new();
        geolocator
            .expect_current_position()
            .times(1)
            .return_once(move || result);
        Arc::new(geolocator)
    }

    #[tokio::test]
    async fn real_position_is_returned_without_alerts() {
        let notifier = Arc::new(RecordingNotifier::default());
        let acquisition = LocationAcquisition::new(
            geolocator(Ok(Coordinate::new(51.5, -0.12))),
            notifier.clone(),
        );

        assert_eq!(acquisition.acquire().await, Coordinate::new(51.5, -0.12));
        assert!(notifier.alerts().is_empty());
    }

    #[rstest]
    #[case::unsupported(GeolocationError::unsupported(), GEOLOCATION_UNSUPPORTED_ALERT)]
    #[case::denied(GeolocationError::denied("user refused"), GEOLOCATION_FAILED_ALERT)]
    #[case::unavailable(GeolocationError::unavailable("no fix"), GEOLOCATION_FAILED_ALERT)]
    #[tokio::test]
    async fn failures_fall_back_to_the_default_coordinate(
        #[case] error: GeolocationError,
        #[case] alert: &str,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let acquisition = LocationAcquisition::new(geolocator(Err(error)), notifier.clone());

        let position = acquisition.acquire().await;

        assert_eq!(position, Coordinate::new(30.0444, 31.2357));
        assert_eq!(notifier.alerts(), vec![alert.to_owned()]);
    }

    #[tokio::test]
    async fn continuation_receives_the_acquired_coordinate() {
        let acquisition = LocationAcquisition::new(
            geolocator(Err(GeolocationError::unsupported())),
            Arc::new(RecordingNotifier::default()),
        );

        let formatted = acquisition
            .acquire_then(|position| async move { position.lon_lat() })
            .await;
        assert_eq!(formatted, "31.2357,30.0444");
    }

    fn reporter(transport: MockApiTransport, sessions: Arc<InMemorySessionStore>) -> LocationReporter {
        let interceptor = AuthInterceptor::new(
            Arc::new(transport),
            sessions.clone(),
            Arc::new(RecordingNavigator::default()),
        );
        LocationReporter::new(CarServiceApi::new(interceptor, sessions.clone()), sessions)
    }

    #[tokio::test]
    async fn anonymous_users_do_not_send_locations() {
        let mut transport = MockApiTransport::new();
        transport.expect_send().never();
        let reporter = reporter(transport, Arc::new(InMemorySessionStore::default()));

        let report = reporter
            .send_location_to_backend(Coordinate::new(1.0, 2.0))
            .await;
        assert_eq!(report, LocationReport::SkippedAnonymous);
    }

    #[tokio::test]
    async fn signed_in_users_share_their_location() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.path == "/save-location"
                    && request.body
                        == Some(json!({ "user_id": "7", "latitude": 30.0444, "longitude": 31.2357 }))
            })
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::json_body(
                    200,
                    &json!({ "message": "Location saved successfully" }),
                ))
            });
        let session = Session::new(UserId::new("7").expect("fixture id"), "Ana", "a@b.com");
        let reporter = reporter(transport, Arc::new(InMemorySessionStore::with_session(&session)));
        let acquisition = LocationAcquisition::new(
            geolocator(Err(GeolocationError::denied("blocked"))),
            Arc::new(RecordingNotifier::default()),
        );

        assert_eq!(reporter.share_location(&acquisition).await, LocationReport::Saved);
    }

    #[tokio::test]
    async fn backend_failures_are_reported_not_raised() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(ApiResponse::json_body(500, &json!({ "error": "db down" }))));
        let session = Session::new(UserId::new("7").expect("fixture id"), "Ana", "a@b.com");
        let reporter = reporter(transport, Arc::new(InMemorySessionStore::with_session(&session)));

        let report = reporter
            .send_location_to_backend(Coordinate::new(1.0, 2.0))
            .await;
        assert_eq!(report, LocationReport::Failed);
    }
}

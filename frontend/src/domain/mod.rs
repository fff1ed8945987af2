//! Domain primitives, the API client, and the policies wrapped around it.
//!
//! Purpose: Define strongly typed session, coordinate, and payload types,
//! and the services that dispatch requests through the port traits in
//! [`ports`]. Nothing here touches the network, disk, or a terminal
//! directly.
//!
//! Public surface:
//! - Session (alias to `session::Session`) — signed-in user identity.
//! - CarServiceApi (alias to `car_service_api::CarServiceApi`) — one typed
//!   async call per backend endpoint.
//! - AuthInterceptor (alias to `interceptor::AuthInterceptor`) — 401 policy.
//! - LocationAcquisition / LocationReporter — device position with fallback.
//! - ClientError (alias to `error::ClientError`) — client failure taxonomy.

pub mod auth;
pub mod car_service_api;
pub mod coordinate;
pub mod deep_links;
pub mod error;
pub mod interceptor;
pub mod location;
pub mod payloads;
pub mod ports;
pub mod session;
pub mod view;

pub use self::auth::{CarDetails, CredentialsValidationError, SigninCredentials, SignupRequest};
pub use self::car_service_api::{CarServiceApi, DEFAULT_DIRECTIONS_LANG, SigninOutcome};
pub use self::coordinate::{Coordinate, CoordinateError, FALLBACK_COORDINATE};
pub use self::deep_links::{DEFAULT_SUPPORT_PHONE, InvalidPhoneNumber, SupportPhone};
pub use self::error::ClientError;
pub use self::interceptor::{AuthInterceptor, DEFAULT_AUTH_ERROR_REASON, LOGIN_PATH, login_redirect};
pub use self::location::{
    GEOLOCATION_FAILED_ALERT, GEOLOCATION_UNSUPPORTED_ALERT, LocationAcquisition, LocationReport,
    LocationReporter,
};
pub use self::payloads::{
    AppointmentRequest, CenterDetails, CenterService, LOGIN_SUCCESSFUL, MaintenanceCenter, Scalar,
    SearchQuery, SigninResponse, Vehicle,
};
pub use self::session::{
    SESSION_KEYS, Session, SessionValidationError, USER_EMAIL_KEY, USER_ID_KEY, USER_NAME_KEY,
    UserId,
};
pub use self::view::{
    CenterCard, RECENTLY_VIEWED_LIMIT, SelectOption, element_ids, service_options, vehicle_options,
};

/// Convenient client result alias.
pub type ClientResult<T> = Result<T, ClientError>;

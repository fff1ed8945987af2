//! Request and response payloads whose fields the client reads or writes.
//!
//! Endpoints whose response shape belongs entirely to the backend are
//! returned as raw [`serde_json::Value`] instead.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, UserId};

/// Message the backend sends with a successful sign-in.
pub const LOGIN_SUCCESSFUL: &str = "Login successful";

/// Display text of a JSON scalar that may arrive as a number or a string.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::Scalar;
///
/// let year: Scalar = serde_json::from_str("2019").unwrap();
/// let price: Scalar = serde_json::from_str("\"49.5\"").unwrap();
/// assert_eq!(year.to_string(), "2019");
/// assert_eq!(price.to_string(), "49.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawScalar")]
pub struct Scalar(String);

impl Scalar {
    /// Wrap already-formatted text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl AsRef<str> for Scalar {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

impl From<RawScalar> for Scalar {
    fn from(value: RawScalar) -> Self {
        match value {
            RawScalar::Number(number) => Self(number.to_string()),
            RawScalar::Text(text) => Self(text),
            RawScalar::Flag(flag) => Self(flag.to_string()),
        }
    }
}

/// Body returned by `POST /signin` with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninResponse {
    /// Outcome message; [`LOGIN_SUCCESSFUL`] on success.
    #[serde(default)]
    pub message: String,
    /// Id of the authenticated user.
    pub user_id: Option<UserId>,
    /// Display name of the authenticated user.
    pub name: Option<String>,
    /// Email of the authenticated user.
    pub email: Option<String>,
}

/// Free-text problem search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Problem description typed by the user.
    pub query: String,
    /// Car brand used to scope the search.
    pub brand: String,
    /// Car model used to scope the search.
    pub model: String,
    /// Response language, e.g. `en` or `ar`.
    pub lang: String,
}

/// Body for `POST /save-location`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SaveLocationBody<'a> {
    pub(crate) user_id: &'a UserId,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl<'a> SaveLocationBody<'a> {
    pub(crate) fn new(user_id: &'a UserId, coordinate: Coordinate) -> Self {
        Self {
            user_id,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

/// Appointment booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    /// User the appointment belongs to.
    pub user_id: UserId,
    /// Vehicle to be serviced.
    pub vehicle_id: String,
    /// Maintenance center performing the service.
    pub center_id: String,
    /// Service being booked.
    pub service_id: String,
    /// Requested date, as entered by the user.
    pub appointment_date: String,
    /// Free-form notes for the center.
    pub notes: String,
}

/// One vehicle owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vehicle {
    /// Backend vehicle id.
    pub id: Scalar,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Year of manufacture.
    pub year: Scalar,
}

/// Maintenance center detail with its service catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CenterDetails {
    /// Services offered by the center.
    #[serde(default)]
    pub services: Vec<CenterService>,
}

/// One service offered by a maintenance center.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CenterService {
    /// Backend service id.
    pub id: Scalar,
    /// Service name.
    pub name: String,
    /// Listed price.
    pub price: Scalar,
}

/// Entry in the maintenance-center listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaintenanceCenter {
    /// Center name.
    pub name: String,
    /// Latitude of the center.
    pub latitude: f64,
    /// Longitude of the center.
    pub longitude: f64,
}

//! Typed API client for the CarLux backend.
//!
//! Each operation builds one [`ApiRequest`], dispatches it through the
//! [`AuthInterceptor`], and decodes the JSON reply. Endpoints whose payload
//! belongs to the backend return raw [`Value`]s; the rest decode into the
//! DTOs in [`crate::domain::payloads`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::domain::payloads::SaveLocationBody;
use crate::domain::ports::{ApiRequest, SessionStore};
use crate::domain::{
    AppointmentRequest, AuthInterceptor, CenterDetails, ClientError, Coordinate,
    LOGIN_SUCCESSFUL, MaintenanceCenter, SearchQuery, Session, SigninCredentials,
    SigninResponse, SignupRequest, UserId, Vehicle,
};

/// Language used for directions when the caller does not pick one.
pub const DEFAULT_DIRECTIONS_LANG: &str = "en";

/// Result of a sign-in attempt that reached the backend successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninOutcome {
    /// Credentials accepted; the session has been stored.
    SignedIn(Session),
    /// The backend answered without accepting the credentials.
    Rejected {
        /// Message returned by the backend.
        message: String,
    },
}

/// API client bound to one interceptor and session store.
#[derive(Clone)]
pub struct CarServiceApi {
    interceptor: AuthInterceptor,
    sessions: Arc<dyn SessionStore>,
}

impl CarServiceApi {
    /// Build a client that dispatches through `interceptor` and records
    /// sign-ins in `sessions`.
    pub fn new(interceptor: AuthInterceptor, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            interceptor,
            sessions,
        }
    }

    /// Register a new account.
    pub async fn signup(&self, request: &SignupRequest) -> Result<Value, ClientError> {
        self.post_json("/signup", &request.body()).await
    }

    /// Sign in and, on success, store the returned identity as the session.
    ///
    /// # Examples
    /// ```rust,ignore
    /// let creds = SigninCredentials::try_from_parts("a@b.com", "pw")?;
    /// match api.signin(&creds).await? {
    ///     SigninOutcome::SignedIn(session) => assert_eq!(session.user_name(), "Ana"),
    ///     SigninOutcome::Rejected { message } => eprintln!("{message}"),
    /// }
    /// ```
    pub async fn signin(&self, credentials: &SigninCredentials) -> Result<SigninOutcome, ClientError> {
        let response: SigninResponse = self.post_json("/signin", &credentials.body()).await?;
        if response.message != LOGIN_SUCCESSFUL {
            info!(email = credentials.email(), message = %response.message, "sign-in rejected");
            return Ok(SigninOutcome::Rejected {
                message: response.message,
            });
        }

        let session = session_from_signin(response)?;
        self.sessions.set(&session)?;
        info!(user_id = %session.user_id(), "signed in");
        Ok(SigninOutcome::SignedIn(session))
    }

    /// Search known car problems.
    pub async fn search_car_problem(&self, query: &SearchQuery) -> Result<Value, ClientError> {
        self.post_json("/search", query).await
    }

    /// Find the car owner nearest to `position`.
    pub async fn nearest_owner(&self, position: Coordinate) -> Result<Value, ClientError> {
        self.get_json(with_position(ApiRequest::get("/nearest-owner"), position))
            .await
    }

    /// Find the maintenance center nearest to `position`.
    pub async fn nearest_maintenance_center(
        &self,
        position: Coordinate,
    ) -> Result<Value, ClientError> {
        self.get_json(with_position(
            ApiRequest::get("/nearest-maintenance-center"),
            position,
        ))
        .await
    }

    /// List centers near `position`, optionally restricted to one brand.
    pub async fn nearest_centers(
        &self,
        position: Coordinate,
        brand: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut request = with_position(ApiRequest::get("/nearest-center"), position);
        if let Some(make) = brand {
            request = request.with_query("brand", make);
        }
        self.get_json(request).await
    }

    /// Route between two positions. `lang` defaults to
    /// [`DEFAULT_DIRECTIONS_LANG`].
    pub async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        lang: Option<&str>,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest::get("/get-directions")
            .with_query("start", start.lon_lat())
            .with_query("end", end.lon_lat())
            .with_query("lang", lang.unwrap_or(DEFAULT_DIRECTIONS_LANG));
        self.get_json(request).await
    }

    /// Persist `position` against `user_id` on the backend.
    pub async fn save_location(
        &self,
        user_id: &UserId,
        position: Coordinate,
    ) -> Result<Value, ClientError> {
        self.post_json("/save-location", &SaveLocationBody::new(user_id, position))
            .await
    }

    /// Book a maintenance appointment.
    pub async fn book_appointment(
        &self,
        appointment: &AppointmentRequest,
    ) -> Result<Value, ClientError> {
        self.post_json("/api/book-appointment", appointment).await
    }

    /// Vehicles registered to `user_id`.
    pub async fn user_vehicles(&self, user_id: &UserId) -> Result<Vec<Vehicle>, ClientError> {
        self.get_json(ApiRequest::get("/api/user/vehicles").with_query("user_id", user_id))
            .await
    }

    /// Detail, including services, of one maintenance center.
    pub async fn center_details(&self, center_id: &str) -> Result<CenterDetails, ClientError> {
        let segment = center_segment(center_id)?;
        self.get_json(ApiRequest::get(format!("/api/maintenance-center/{segment}")))
            .await
    }

    /// Every maintenance center known to the backend.
    pub async fn maintenance_centers(&self) -> Result<Vec<MaintenanceCenter>, ClientError> {
        self.get_json(ApiRequest::get("/api/maintenance-centers"))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.interceptor.dispatch(&request).await?.json()
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let json = serde_json::to_value(body)
            .map_err(|error| ClientError::invalid_input(format!("unserialisable body: {error}")))?;
        self.interceptor
            .dispatch(&ApiRequest::post(path, json))
            .await?
            .json()
    }
}

/// Center ids are interpolated into the path, so only plain ASCII word
/// characters are accepted.
fn center_segment(center_id: &str) -> Result<&str, ClientError> {
    let segment = center_id.trim();
    let plain = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        Ok(segment)
    } else {
        Err(ClientError::invalid_input(format!(
            "center id '{segment}' is not a path segment"
        )))
    }
}

fn with_position(request: ApiRequest, position: Coordinate) -> ApiRequest {
    request
        .with_query("lat", position.latitude)
        .with_query("lon", position.longitude)
}

fn session_from_signin(response: SigninResponse) -> Result<Session, ClientError> {
    let SigninResponse {
        user_id,
        name,
        email,
        ..
    } = response;
    match (user_id, name, email) {
        (Some(id), Some(user_name), Some(user_email)) => {
            Ok(Session::new(id, user_name, user_email))
        }
        _ => Err(ClientError::decode(
            "successful sign-in response is missing user_id, name or email",
        )),
    }
}

#[cfg(test)]
#[path = "car_service_api_tests.rs"]
mod tests;

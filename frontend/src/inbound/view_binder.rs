//! View binders connecting UI triggers to API calls and page updates.
//!
//! Every binder settles its own failures: the user sees an alert or
//! nothing, and the caller never receives an error. Authentication
//! failures are already handled by the interceptor and stay silent here.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ApiTransport, Geolocator, Navigator, Page, PageError, SessionStore, UserNotifier,
};
use crate::domain::{
    AppointmentRequest, AuthInterceptor, CarDetails, CarServiceApi, CenterCard, ClientError,
    Coordinate, LOGIN_PATH, LocationAcquisition, LocationReport, LocationReporter,
    RECENTLY_VIEWED_LIMIT, SearchQuery, SelectOption, Session, SigninCredentials, SigninOutcome,
    SignupRequest, SupportPhone, element_ids, service_options, vehicle_options,
};

/// Location the browser is sent to after signing in.
pub const HOME_PATH: &str = "/home";

/// Alerts shown by the view binders.
pub mod alerts {
    /// The backend answered sign-in without accepting the credentials.
    pub const SIGN_IN_REJECTED: &str = "Sign in failed. Check your credentials.";
    /// Sign-in failed for any other reason.
    pub const SIGN_IN_FAILED: &str = "An error occurred. Please try again.";
    /// Registration failed.
    pub const SIGN_UP_FAILED: &str = "Sign up failed. Please try again.";
    /// Problem search failed.
    pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
    /// Manual coordinates were not numbers.
    pub const INVALID_COORDINATES: &str = "Please enter a valid latitude and longitude.";
    /// Vehicles could not be loaded.
    pub const VEHICLES_FAILED: &str = "Failed to load vehicles. Please try again.";
    /// Center services could not be loaded.
    pub const SERVICES_FAILED: &str = "Failed to load services. Please try again.";
    /// The appointment could not be booked.
    pub const BOOKING_FAILED: &str = "Failed to book appointment. Please try again.";
}

/// Browser surfaces a [`ViewBinder`] drives.
#[derive(Clone)]
pub struct ViewPorts {
    /// Client-held session.
    pub sessions: Arc<dyn SessionStore>,
    /// Current browsing context.
    pub navigator: Arc<dyn Navigator>,
    /// Blocking alerts.
    pub notifier: Arc<dyn UserNotifier>,
    /// Rendered page.
    pub page: Arc<dyn Page>,
    /// Device position.
    pub geolocator: Arc<dyn Geolocator>,
}

/// Appointment form fields; the user comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    /// Selected vehicle.
    pub vehicle_id: String,
    /// Selected center.
    pub center_id: String,
    /// Selected service.
    pub service_id: String,
    /// Requested date.
    pub appointment_date: String,
    /// Free-form notes.
    pub notes: String,
}

/// Event handlers for every page of the client.
#[derive(Clone)]
pub struct ViewBinder {
    api: CarServiceApi,
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn UserNotifier>,
    page: Arc<dyn Page>,
    location: LocationAcquisition,
    reporter: LocationReporter,
    support_phone: SupportPhone,
}

impl ViewBinder {
    /// Wire the API client over `transport` and bind it to `ports`.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        ports: ViewPorts,
        support_phone: SupportPhone,
    ) -> Self {
        let ViewPorts {
            sessions,
            navigator,
            notifier,
            page,
            geolocator,
        } = ports;
        let interceptor = AuthInterceptor::new(transport, sessions.clone(), navigator.clone());
        let api = CarServiceApi::new(interceptor, sessions.clone());
        Self {
            reporter: LocationReporter::new(api.clone(), sessions.clone()),
            location: LocationAcquisition::new(geolocator, notifier.clone()),
            api,
            sessions,
            navigator,
            notifier,
            page,
            support_phone,
        }
    }

    /// Underlying API client.
    pub fn api(&self) -> &CarServiceApi {
        &self.api
    }

    /// Fill the center containers from the backend listing.
    pub async fn render_maintenance_centers(&self) {
        let containers = [element_ids::ALL_CENTERS, element_ids::RECENTLY_VIEWED];
        if let Some(missing) = containers.iter().find(|id| !self.page.contains(id)) {
            error!(element_id = *missing, "center containers missing from page");
            return;
        }

        let centers = match self.api.maintenance_centers().await {
            Ok(centers) => centers,
            Err(err) => {
                error!(error = %err, "could not load maintenance centers");
                return;
            }
        };
        info!(count = centers.len(), "rendering maintenance centers");
        for (index, center) in centers.iter().enumerate() {
            let card = CenterCard::from(center);
            self.append(element_ids::ALL_CENTERS, &card);
            if index < RECENTLY_VIEWED_LIMIT {
                self.append(element_ids::RECENTLY_VIEWED, &card);
            }
        }
    }

    /// Sign in, greet the user, and go home.
    pub async fn sign_in(&self, email: &str, password: &str) -> Option<Session> {
        let credentials = match SigninCredentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                info!(error = %err, "sign-in form incomplete");
                self.notifier.alert(alerts::SIGN_IN_REJECTED);
                return None;
            }
        };
        match self.api.signin(&credentials).await {
            Ok(SigninOutcome::SignedIn(session)) => {
                self.notifier
                    .alert(&format!("Welcome, {}!", session.user_name()));
                self.navigator.navigate(HOME_PATH);
                Some(session)
            }
            Ok(SigninOutcome::Rejected { .. }) => {
                self.notifier.alert(alerts::SIGN_IN_REJECTED);
                None
            }
            Err(err) => {
                self.report(&err, "sign-in failed", alerts::SIGN_IN_FAILED);
                None
            }
        }
    }

    /// Drop the session and return to the login view.
    pub fn sign_out(&self) {
        if let Err(err) = self.sessions.clear() {
            warn!(error = %err, "failed to clear session on sign-out");
        }
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Register an account with its first car.
    pub async fn sign_up(
        &self,
        email: &str,
        name: &str,
        password: &str,
        car: CarDetails,
    ) -> Option<Value> {
        let request = match SignupRequest::try_new(email, name, password, car) {
            Ok(request) => request,
            Err(err) => {
                info!(error = %err, "sign-up form incomplete");
                self.notifier.alert(alerts::SIGN_UP_FAILED);
                return None;
            }
        };
        self.settle(self.api.signup(&request).await, "sign-up failed", alerts::SIGN_UP_FAILED)
    }

    /// Search known car problems.
    pub async fn search(&self, query: &SearchQuery) -> Option<Value> {
        self.settle(
            self.api.search_car_problem(query).await,
            "search failed",
            alerts::SEARCH_FAILED,
        )
    }

    /// Show the nearest car owner to `position`.
    pub async fn show_nearest_owner(&self, position: Coordinate) {
        let result = self.api.nearest_owner(position).await;
        self.render_json(element_ids::NEAREST_OWNER_RESPONSE, result);
    }

    /// Acquire the device position and show the nearest car owner.
    pub async fn show_nearest_owner_here(&self) {
        let position = self.location.acquire().await;
        self.show_nearest_owner(position).await;
    }

    /// Show the nearest maintenance center to raw coordinates.
    pub async fn show_nearest_center(&self, latitude: f64, longitude: f64) {
        let Ok(position) = Coordinate::try_new(latitude, longitude) else {
            self.notifier.alert(alerts::INVALID_COORDINATES);
            return;
        };
        let result = self.api.nearest_maintenance_center(position).await;
        self.render_json(element_ids::NEAREST_CENTER_RESPONSE, result);
    }

    /// Show centers near `position`, optionally for one brand.
    pub async fn show_nearest_centers(&self, position: Coordinate, brand: Option<&str>) {
        let result = self.api.nearest_centers(position, brand).await;
        self.render_json(element_ids::NEAREST_CENTERS_RESPONSE, result);
    }

    /// Show a route between two positions.
    pub async fn show_directions(&self, start: Coordinate, end: Coordinate, lang: Option<&str>) {
        let result = self.api.directions(start, end, lang).await;
        self.render_json(element_ids::DIRECTIONS_RESPONSE, result);
    }

    /// Read the manual coordinate inputs and show the nearest car owner.
    pub async fn use_manual_location(&self) {
        let latitude = self.page.input_value(element_ids::MANUAL_LAT);
        let longitude = self.page.input_value(element_ids::MANUAL_LON);
        let position = match (latitude, longitude) {
            (Ok(lat), Ok(lon)) => Coordinate::parse(&lat, &lon).map_err(|err| err.to_string()),
            (Err(err), _) | (_, Err(err)) => Err(err.to_string()),
        };
        match position {
            Ok(position) => {
                info!(%position, "using manually entered location");
                self.show_nearest_owner(position).await;
            }
            Err(reason) => {
                info!(%reason, "manual location rejected");
                self.notifier.alert(alerts::INVALID_COORDINATES);
            }
        }
    }

    /// Fill the vehicle selector with the signed-in user's vehicles.
    pub async fn load_user_vehicles(&self) {
        let session = match self.sessions.get() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.report(
                    &ClientError::not_signed_in(),
                    "cannot load vehicles",
                    alerts::VEHICLES_FAILED,
                );
                return;
            }
            Err(err) => {
                self.report(&err.into(), "cannot load vehicles", alerts::VEHICLES_FAILED);
                return;
            }
        };
        match self.api.user_vehicles(session.user_id()).await {
            Ok(vehicles) => {
                self.replace_options(element_ids::VEHICLE_SELECT, &vehicle_options(&vehicles));
            }
            Err(err) => self.report(&err, "failed to load vehicles", alerts::VEHICLES_FAILED),
        }
    }

    /// Fill the service selector with the services of `center_id`.
    pub async fn load_center_services(&self, center_id: &str) {
        match self.api.center_details(center_id).await {
            Ok(details) => {
                self.replace_options(
                    element_ids::SERVICE_SELECT,
                    &service_options(&details.services),
                );
            }
            Err(err) => self.report(&err, "failed to load services", alerts::SERVICES_FAILED),
        }
    }

    /// Book an appointment for the signed-in user.
    pub async fn submit_booking(&self, form: BookingForm) -> Option<Value> {
        let session = match self.sessions.get() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.report(
                    &ClientError::not_signed_in(),
                    "cannot book appointment",
                    alerts::BOOKING_FAILED,
                );
                return None;
            }
            Err(err) => {
                self.report(&err.into(), "cannot book appointment", alerts::BOOKING_FAILED);
                return None;
            }
        };
        let BookingForm {
            vehicle_id,
            center_id,
            service_id,
            appointment_date,
            notes,
        } = form;
        let appointment = AppointmentRequest {
            user_id: session.user_id().clone(),
            vehicle_id,
            center_id,
            service_id,
            appointment_date,
            notes,
        };
        self.settle(
            self.api.book_appointment(&appointment).await,
            "booking failed",
            alerts::BOOKING_FAILED,
        )
    }

    /// Acquire the device position and save it for the signed-in user.
    pub async fn share_location(&self) -> LocationReport {
        self.reporter.share_location(&self.location).await
    }

    /// Open a WhatsApp chat with the support line in a new tab.
    pub fn open_whatsapp(&self) {
        self.navigator
            .open_in_new_tab(&self.support_phone.whatsapp_url());
    }

    /// Dial the support line.
    pub fn call_center(&self) {
        self.navigator.navigate(&self.support_phone.call_url());
    }

    fn settle(
        &self,
        result: Result<Value, ClientError>,
        context: &str,
        alert: &str,
    ) -> Option<Value> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(&err, context, alert);
                None
            }
        }
    }

    fn report(&self, err: &ClientError, context: &str, alert: &str) {
        if err.is_handled_by_interceptor() {
            info!(error = %err, "{context}; session expired");
            return;
        }
        error!(error = %err, "{context}");
        self.notifier.alert(alert);
    }

    fn render_json(&self, element_id: &str, result: Result<Value, ClientError>) {
        let value = match result {
            Ok(value) => value,
            Err(err) => {
                error!(element_id, error = %err, "lookup failed");
                return;
            }
        };
        match serde_json::to_string_pretty(&value) {
            Ok(text) => log_page_error(self.page.set_text(element_id, &text)),
            Err(err) => error!(element_id, error = %err, "could not format lookup result"),
        }
    }

    fn append(&self, element_id: &str, card: &CenterCard) {
        log_page_error(self.page.append_card(element_id, card));
    }

    fn replace_options(&self, element_id: &str, options: &[SelectOption]) {
        log_page_error(self.page.replace_options(element_id, options));
    }
}

fn log_page_error(result: Result<(), PageError>) {
    if let Err(err) = result {
        error!(error = %err, "page update skipped");
    }
}

#[cfg(test)]
#[path = "view_binder_tests.rs"]
mod tests;

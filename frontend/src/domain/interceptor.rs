//! Auth-error interceptor wrapped around every API request.
//!
//! The client is Authenticated while a session is stored and Anonymous
//! otherwise. Any 401 response moves it to Anonymous: the session is
//! cleared, the browsing context is sent to the login view with a reason,
//! and the caller receives [`ClientError::Unauthorized`]. The original
//! request is not retried.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::ClientError;
use crate::domain::ports::{
    ApiRequest, ApiResponse, ApiTransport, Navigator, SessionStore, UNAUTHORIZED_STATUS,
};

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";

/// Reason shown when the backend's 401 carries no message of its own.
pub const DEFAULT_AUTH_ERROR_REASON: &str = "Please sign in to access this feature";

/// Build the login redirect for `reason`.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::login_redirect;
///
/// assert_eq!(
///     login_redirect("Session expired"),
///     "/login?error=Session+expired"
/// );
/// ```
pub fn login_redirect(reason: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(reason.as_bytes()).collect();
    format!("{LOGIN_PATH}?error={encoded}")
}

#[derive(Deserialize)]
struct RejectionBody {
    error: Option<String>,
}

fn rejection_reason(response: &ApiResponse) -> String {
    serde_json::from_slice::<RejectionBody>(&response.body)
        .ok()
        .and_then(|body| body.error)
        .map(|reason| reason.trim().to_owned())
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTH_ERROR_REASON.to_owned())
}

/// Request dispatcher that enforces the 401 policy.
#[derive(Clone)]
pub struct AuthInterceptor {
    transport: Arc<dyn ApiTransport>,
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    /// Wrap `transport`, clearing `sessions` and redirecting through
    /// `navigator` on authentication failure.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            sessions,
            navigator,
        }
    }

    /// Send `request` and return its response when the status is 2xx.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] after a 401, once the session has
    ///   been cleared and the redirect issued.
    /// - [`ClientError::Status`] for any other non-2xx status.
    /// - Whatever the transport reports when no response arrived.
    pub async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        debug!(method = ?request.method, path = %request.path, "dispatching API request");
        let response = self.transport.send(request).await?;

        if response.status == UNAUTHORIZED_STATUS {
            return Err(self.expire_session(request, &response));
        }
        if !response.is_success() {
            warn!(
                path = %request.path,
                status = response.status,
                "API request failed"
            );
            return Err(ClientError::status(response.status, response.body_preview()));
        }
        Ok(response)
    }

    fn expire_session(&self, request: &ApiRequest, response: &ApiResponse) -> ClientError {
        let reason = rejection_reason(response);
        info!(path = %request.path, %reason, "authentication rejected; signing out");
        if let Err(error) = self.sessions.clear() {
            warn!(%error, "failed to clear session after authentication failure");
        }
        self.navigator.navigate(&login_redirect(&reason));
        ClientError::unauthorized(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        InMemorySessionStore, MockApiTransport, MockSessionStore, RecordingNavigator,
        SessionStoreError,
    };
    use crate::domain::{Session, UserId};
    use rstest::{fixture, rstest};
    use serde_json::json;

    struct Harness {
        sessions: Arc<InMemorySessionStore>,
        navigator: Arc<RecordingNavigator>,
    }

    #[fixture]
    fn harness() -> Harness {
        let session = Session::new(UserId::new("7").expect("fixture id"), "Ana", "a@b.com");
        Harness {
            sessions: Arc::new(InMemorySessionStore::with_session(&session)),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    fn responding(status: u16, body: serde_json::Value) -> Arc<MockApiTransport> {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| Ok(ApiResponse::json_body(status, &body)));
        Arc::new(transport)
    }

    fn interceptor(harness: &Harness, transport: Arc<MockApiTransport>) -> AuthInterceptor {
        AuthInterceptor::new(
            transport,
            harness.sessions.clone(),
            harness.navigator.clone(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn success_passes_the_response_through(harness: Harness) {
        let interceptor = interceptor(&harness, responding(200, json!({ "ok": true })));
        let response = interceptor
            .dispatch(&ApiRequest::get("/api/maintenance-centers"))
            .await
            .expect("2xx should pass");
        assert_eq!(response.status, 200);
        assert!(harness.sessions.get().expect("get").is_some());
        assert!(harness.navigator.visits().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn unauthorised_clears_session_and_redirects(harness: Harness) {
        let interceptor = interceptor(&harness, responding(401, json!({})));
        let err = interceptor
            .dispatch(&ApiRequest::post("/api/book-appointment", json!({})))
            .await
            .expect_err("401 must fail");

        assert_eq!(err, ClientError::unauthorized(DEFAULT_AUTH_ERROR_REASON));
        assert!(harness.sessions.entries().is_empty());
        assert_eq!(
            harness.navigator.current_location().as_deref(),
            Some("/login?error=Please+sign+in+to+access+this+feature")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unauthorised_reason_prefers_backend_error(harness: Harness) {
        let interceptor = interceptor(
            &harness,
            responding(401, json!({ "error": "Invalid email or password" })),
        );
        let err = interceptor
            .dispatch(&ApiRequest::post("/signin", json!({})))
            .await
            .expect_err("401 must fail");
        assert_eq!(err, ClientError::unauthorized("Invalid email or password"));
        let location = harness.navigator.current_location().expect("redirected");
        assert!(location.starts_with("/login?error="));
    }

    #[rstest]
    #[case(400)]
    #[case(404)]
    #[case(500)]
    #[tokio::test]
    async fn other_failures_keep_the_session(harness: Harness, #[case] status: u16) {
        let interceptor = interceptor(&harness, responding(status, json!({ "error": "nope" })));
        let err = interceptor
            .dispatch(&ApiRequest::get("/nearest-owner"))
            .await
            .expect_err("non-2xx must fail");
        assert!(matches!(err, ClientError::Status { status: s, .. } if s == status));
        assert!(harness.sessions.get().expect("get").is_some());
        assert!(harness.navigator.visits().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn transport_failures_propagate_untouched(harness: Harness) {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(ClientError::transport("connection refused")));
        let interceptor = interceptor(&harness, Arc::new(transport));
        let err = interceptor
            .dispatch(&ApiRequest::get("/nearest-owner"))
            .await
            .expect_err("transport failure must surface");
        assert_eq!(err, ClientError::transport("connection refused"));
        assert!(harness.sessions.get().expect("get").is_some());
    }

    #[tokio::test]
    async fn redirect_happens_even_if_clearing_fails() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_clear()
            .times(1)
            .returning(|| Err(SessionStoreError::write("read-only volume")));
        let navigator = Arc::new(RecordingNavigator::default());
        let interceptor = AuthInterceptor::new(
            responding(401, json!({})),
            Arc::new(sessions),
            navigator.clone(),
        );

        let err = interceptor
            .dispatch(&ApiRequest::get("/api/user/vehicles"))
            .await
            .expect_err("401 must fail");
        assert!(err.is_handled_by_interceptor());
        assert!(navigator.current_location().is_some());
    }
}

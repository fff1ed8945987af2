//! Client-level error taxonomy.
//!
//! Every API client call resolves to one of these variants. View binders
//! decide how each one reaches the user: most become alerts, while
//! [`ClientError::Unauthorized`] has already been handled by the
//! auth-error interceptor and is only logged.

use crate::domain::ports::{SessionStoreError, define_port_error};

define_port_error! {
    /// Failures surfaced by the API client and the layers around it.
    pub enum ClientError {
        /// Network transport failed before a response arrived.
        Transport {
            /// Transport failure description.
            message: String,
        } => "request transport failed: {message}",
        /// The backend answered with a non-success status other than 401.
        Status {
            /// HTTP status code.
            status: u16,
            /// Compact preview of the response body.
            message: String,
        } => "request failed with status {status}: {message}",
        /// The backend rejected the session; the client is now anonymous.
        Unauthorized {
            /// Reason carried on the login redirect.
            reason: String,
        } => "authentication required: {reason}",
        /// The response body was not the JSON the caller expected.
        Decode {
            /// Decoder error.
            message: String,
        } => "response decode failed: {message}",
        /// Caller input was rejected before any request was issued.
        InvalidInput {
            /// What was wrong with the input.
            message: String,
        } => "invalid input: {message}",
        /// The operation needs a signed-in user and none is present.
        NotSignedIn =>
            "user not logged in",
        /// The session store could not be read or written.
        Storage {
            /// Session store failure.
            message: String,
        } => "session storage failed: {message}",
    }
}

impl ClientError {
    /// Return whether the auth-error interceptor already dealt with this
    /// failure, so callers must not alert on it again.
    pub fn is_handled_by_interceptor(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<SessionStoreError> for ClientError {
    fn from(value: SessionStoreError) -> Self {
        Self::storage(value.to_string())
    }
}

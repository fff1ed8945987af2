//! Client-held session record.
//!
//! A [`Session`] is the only signal that a user is signed in. It is stored
//! under three fixed keys and is either fully present or absent.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "userId";
/// Storage key holding the signed-in user's display name.
pub const USER_NAME_KEY: &str = "userName";
/// Storage key holding the signed-in user's email address.
pub const USER_EMAIL_KEY: &str = "userEmail";

/// All keys owned by the session, in storage order.
pub const SESSION_KEYS: [&str; 3] = [USER_ID_KEY, USER_NAME_KEY, USER_EMAIL_KEY];

/// Validation errors for session fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// The user id was empty or padded with whitespace.
    InvalidUserId,
    /// Some, but not all, session keys were present.
    Incomplete {
        /// Keys that were absent.
        missing: Vec<&'static str>,
    },
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserId => write!(f, "user id must be a non-empty trimmed value"),
            Self::Incomplete { missing } => {
                write!(f, "session is incomplete; missing {}", missing.join(", "))
            }
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Backend user identifier.
///
/// The backend issues numeric ids; they are kept in their decimal string
/// form, which is also how they are written to storage.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::UserId;
///
/// let id: UserId = serde_json::from_str("7").unwrap();
/// assert_eq!(id.as_ref(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUserId", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, SessionValidationError> {
        let id = id.into();
        if id.is_empty() || id.trim() != id {
            return Err(SessionValidationError::InvalidUserId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawUserId> for UserId {
    type Error = SessionValidationError;

    fn try_from(value: RawUserId) -> Result<Self, Self::Error> {
        match value {
            RawUserId::Number(number) => Self::new(number.to_string()),
            RawUserId::Text(text) => Self::new(text),
        }
    }
}

/// Identity of the signed-in user.
///
/// ## Invariants
/// - All three fields are set together; there is no partial session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    user_name: String,
    user_email: String,
}

impl Session {
    /// Build a session from its three fields.
    pub fn new(user_id: UserId, user_name: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            user_email: user_email.into(),
        }
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Display name of the signed-in user.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Email address of the signed-in user.
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    /// Key/value pairs written to storage for this session.
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (USER_ID_KEY.to_owned(), self.user_id.to_string()),
            (USER_NAME_KEY.to_owned(), self.user_name.clone()),
            (USER_EMAIL_KEY.to_owned(), self.user_email.clone()),
        ])
    }

    /// Rebuild a session from stored key/value pairs.
    ///
    /// Returns `Ok(None)` when none of the session keys are present and an
    /// error when only some of them are.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use carlux_frontend::domain::Session;
    ///
    /// assert_eq!(Session::from_entries(&BTreeMap::new()), Ok(None));
    /// ```
    pub fn from_entries(
        entries: &BTreeMap<String, String>,
    ) -> Result<Option<Self>, SessionValidationError> {
        let missing: Vec<&'static str> = SESSION_KEYS
            .into_iter()
            .filter(|key| !entries.contains_key(*key))
            .collect();
        if missing.len() == SESSION_KEYS.len() {
            return Ok(None);
        }
        if !missing.is_empty() {
            return Err(SessionValidationError::Incomplete { missing });
        }

        let field = |key: &str| entries.get(key).cloned().unwrap_or_default();
        Ok(Some(Self::new(
            UserId::new(field(USER_ID_KEY))?,
            field(USER_NAME_KEY),
            field(USER_EMAIL_KEY),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ana() -> Session {
        Session::new(UserId::new("7").expect("fixture id"), "Ana", "a@b.com")
    }

    #[rstest]
    #[case("")]
    #[case(" 7")]
    #[case("7 ")]
    fn user_ids_reject_blank_or_padded_values(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(SessionValidationError::InvalidUserId));
    }

    #[rstest]
    #[case("7", "7")]
    #[case("\"42\"", "42")]
    fn user_ids_decode_from_numbers_and_strings(#[case] json: &str, #[case] expected: &str) {
        let id: UserId = serde_json::from_str(json).expect("user id should decode");
        assert_eq!(id.as_ref(), expected);
    }

    #[test]
    fn entries_use_the_three_storage_keys() {
        let entries = ana().to_entries();
        assert_eq!(entries.get(USER_ID_KEY).map(String::as_str), Some("7"));
        assert_eq!(entries.get(USER_NAME_KEY).map(String::as_str), Some("Ana"));
        assert_eq!(entries.get(USER_EMAIL_KEY).map(String::as_str), Some("a@b.com"));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn entries_rebuild_the_same_session() {
        let rebuilt = Session::from_entries(&ana().to_entries()).expect("entries are complete");
        assert_eq!(rebuilt, Some(ana()));
    }

    #[test]
    fn partial_entries_are_reported_as_incomplete() {
        let mut entries = ana().to_entries();
        entries.remove(USER_EMAIL_KEY);
        let err = Session::from_entries(&entries).expect_err("partial session must fail");
        assert_eq!(
            err,
            SessionValidationError::Incomplete {
                missing: vec![USER_EMAIL_KEY],
            }
        );
    }
}

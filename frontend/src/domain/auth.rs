//! Credential and registration payloads.
//!
//! Passwords are held in [`Zeroizing`] buffers and only borrowed when the
//! request body is serialised.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

/// Domain error returned when credential inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use carlux_frontend::domain::SigninCredentials;
///
/// let creds = SigninCredentials::try_from_parts(" a@b.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "a@b.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigninCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SigninCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to sign in.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn body(&self) -> SigninBody<'_> {
        SigninBody {
            email: &self.email,
            password: self.password.as_str(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct SigninBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration form for a new account and its first car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    email: String,
    name: String,
    password: Zeroizing<String>,
    car_brand: String,
    car_model: String,
    manufacturing_year: u16,
}

/// Car details captured at signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDetails {
    /// Manufacturer, e.g. `Toyota`.
    pub brand: String,
    /// Model name, e.g. `Corolla`.
    pub model: String,
    /// Year of manufacture.
    pub manufacturing_year: u16,
}

impl SignupRequest {
    /// Validate the account fields and attach the car details.
    pub fn try_new(
        email: &str,
        name: &str,
        password: &str,
        car: CarDetails,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized_email = email.trim();
        if normalized_email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let normalized_name = name.trim();
        if normalized_name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized_email.to_owned(),
            name: normalized_name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            car_brand: car.brand,
            car_model: car.model,
            manufacturing_year: car.manufacturing_year,
        })
    }

    /// Email for the new account.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn body(&self) -> SignupBody<'_> {
        SignupBody {
            email: &self.email,
            name: &self.name,
            password: self.password.as_str(),
            car_brand: &self.car_brand,
            car_model: &self.car_model,
            manufacturing_year: self.manufacturing_year,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct SignupBody<'a> {
    email: &'a str,
    name: &'a str,
    password: &'a str,
    car_brand: &'a str,
    car_model: &'a str,
    manufacturing_year: u16,
}

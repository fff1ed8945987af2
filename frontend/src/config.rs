//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{Coordinate, CoordinateError, InvalidPhoneNumber, SupportPhone};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8082";
const DEFAULT_SESSION_DIR: &str = ".carlux";

/// Errors raised when a configured value cannot be used.
#[derive(Debug, Error)]
pub enum ClientSettingsError {
    /// The backend base URL did not parse.
    #[error("invalid api_base_url '{value}': {source}")]
    BaseUrl {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The support phone was not a phone number.
    #[error(transparent)]
    SupportPhone(#[from] InvalidPhoneNumber),
    /// Only one of latitude and longitude was configured.
    #[error("latitude and longitude must be configured together")]
    PartialPosition,
    /// The configured position was not finite.
    #[error("invalid configured position: {0}")]
    Position(#[from] CoordinateError),
}

/// Configuration values for the CarLux client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARLUX")]
pub struct ClientSettings {
    /// Base URL of the backend API.
    #[ortho_config(default = "http://127.0.0.1:8082".to_owned())]
    pub api_base_url: String,
    /// Directory holding the stored session.
    pub session_dir: Option<PathBuf>,
    /// Support line used for WhatsApp and call links.
    pub support_phone: Option<String>,
    /// Latitude reported by the static geolocator.
    pub latitude: Option<f64>,
    /// Longitude reported by the static geolocator.
    pub longitude: Option<f64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_dir: None,
            support_phone: None,
            latitude: None,
            longitude: None,
        }
    }
}

impl ClientSettings {
    /// Return the parsed backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSettingsError::BaseUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Url, ClientSettingsError> {
        Url::parse(&self.api_base_url).map_err(|source| ClientSettingsError::BaseUrl {
            value: self.api_base_url.clone(),
            source,
        })
    }

    /// Return the session directory, falling back to `.carlux`.
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Return the support phone, falling back to the default line.
    ///
    /// # Errors
    ///
    /// Returns [`ClientSettingsError::SupportPhone`] for non-numeric values.
    pub fn support_phone(&self) -> Result<SupportPhone, ClientSettingsError> {
        match self.support_phone.as_deref() {
            Some(raw) => Ok(SupportPhone::new(raw)?),
            None => Ok(SupportPhone::default()),
        }
    }

    /// Return the configured device position, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when only one component is set or either is not
    /// finite.
    pub fn static_position(&self) -> Result<Option<Coordinate>, ClientSettingsError> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(None),
            (Some(latitude), Some(longitude)) => {
                Ok(Some(Coordinate::try_new(latitude, longitude)?))
            }
            _ => Err(ClientSettingsError::PartialPosition),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "CARLUX_API_BASE_URL",
        "CARLUX_SESSION_DIR",
        "CARLUX_SUPPORT_PHONE",
        "CARLUX_LATITUDE",
        "CARLUX_LONGITUDE",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("carlux")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default parses").as_str(),
            "http://127.0.0.1:8082/"
        );
        assert_eq!(settings.session_dir(), PathBuf::from(".carlux"));
        assert_eq!(
            settings.support_phone().expect("default phone"),
            SupportPhone::default()
        );
        assert_eq!(settings.static_position().expect("no position"), None);
    }

    #[rstest]
    fn loaded_defaults_match_the_default_impl() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        let fallback = ClientSettings::default();
        assert_eq!(settings.api_base_url, fallback.api_base_url);
        assert_eq!(settings.session_dir, fallback.session_dir);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CARLUX_API_BASE_URL", Some("https://api.carlux.test".to_owned())),
            ("CARLUX_SESSION_DIR", Some("/tmp/carlux-session".to_owned())),
            ("CARLUX_SUPPORT_PHONE", Some("+44 7700 900123".to_owned())),
            ("CARLUX_LATITUDE", Some("51.5".to_owned())),
            ("CARLUX_LONGITUDE", Some("-0.12".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("override parses").host_str(),
            Some("api.carlux.test")
        );
        assert_eq!(settings.session_dir(), PathBuf::from("/tmp/carlux-session"));
        assert_eq!(
            settings.support_phone().expect("override phone").call_url(),
            "tel:447700900123"
        );
        assert_eq!(
            settings.static_position().expect("position"),
            Some(Coordinate::new(51.5, -0.12))
        );
    }

    #[rstest]
    #[case(Some(1.0), None)]
    #[case(None, Some(2.0))]
    fn half_a_position_is_rejected(#[case] latitude: Option<f64>, #[case] longitude: Option<f64>) {
        let settings = ClientSettings {
            latitude,
            longitude,
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.static_position(),
            Err(ClientSettingsError::PartialPosition)
        ));
    }

    #[test]
    fn malformed_base_url_is_reported() {
        let settings = ClientSettings {
            api_base_url: "not a url".to_owned(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.api_base_url(),
            Err(ClientSettingsError::BaseUrl { .. })
        ));
    }
}

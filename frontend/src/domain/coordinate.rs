//! Geographic coordinates exchanged with the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate used when the device cannot report its own position.
pub const FALLBACK_COORDINATE: Coordinate = Coordinate::new(30.0444, 31.2357);

/// Errors returned while parsing coordinates from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// A component was not a number.
    NotANumber {
        /// Which component failed.
        component: &'static str,
        /// Raw input as received.
        raw: String,
    },
    /// A component parsed to NaN or infinity.
    NotFinite {
        /// Which component failed.
        component: &'static str,
    },
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { component, raw } => {
                write!(f, "{component} must be a number, got '{raw}'")
            }
            Self::NotFinite { component } => write!(f, "{component} must be finite"),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// A WGS84 position.
///
/// No range validation is applied; components only need to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate without validation.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting non-finite components.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() {
            return Err(CoordinateError::NotFinite {
                component: "latitude",
            });
        }
        if !longitude.is_finite() {
            return Err(CoordinateError::NotFinite {
                component: "longitude",
            });
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Parse a coordinate from two text inputs.
    ///
    /// # Examples
    /// ```
    /// use carlux_frontend::domain::Coordinate;
    ///
    /// let coordinate = Coordinate::parse(" 30.05 ", "31.24").unwrap();
    /// assert_eq!(coordinate, Coordinate::new(30.05, 31.24));
    /// assert!(Coordinate::parse("north", "31.24").is_err());
    /// ```
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        Self::try_new(
            parse_component("latitude", latitude)?,
            parse_component("longitude", longitude)?,
        )
    }

    /// Render as `lon,lat`, the order the directions endpoint expects.
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

fn parse_component(component: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotANumber {
            component,
            raw: raw.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "31.2")]
    #[case("30.1", "east")]
    #[case("NaN", "31.2")]
    #[case("30.1", "inf")]
    fn parse_rejects_non_numeric_or_non_finite_input(#[case] lat: &str, #[case] lon: &str) {
        assert!(Coordinate::parse(lat, lon).is_err());
    }

    #[test]
    fn lon_lat_puts_longitude_first() {
        assert_eq!(Coordinate::new(30.0444, 31.2357).lon_lat(), "31.2357,30.0444");
    }

    #[test]
    fn fallback_is_the_fixed_default_position() {
        assert_eq!(FALLBACK_COORDINATE.latitude.to_string(), "30.0444");
        assert_eq!(FALLBACK_COORDINATE.longitude.to_string(), "31.2357");
    }
}

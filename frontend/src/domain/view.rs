//! Structured render output consumed by the [`Page`](crate::domain::ports::Page) port.

use std::fmt;

use crate::domain::{CenterService, MaintenanceCenter, Vehicle};

/// Element ids the view binders read from or render into.
pub mod element_ids {
    /// Container listing every maintenance center.
    pub const ALL_CENTERS: &str = "all-centers";
    /// Container listing the first few maintenance centers.
    pub const RECENTLY_VIEWED: &str = "recently-viewed";
    /// Text block showing the nearest car owner lookup.
    pub const NEAREST_OWNER_RESPONSE: &str = "nearest-owner-response";
    /// Text block showing the nearest maintenance center lookup.
    pub const NEAREST_CENTER_RESPONSE: &str = "nearest-center-response";
    /// Text block showing the brand-filtered center lookup.
    pub const NEAREST_CENTERS_RESPONSE: &str = "nearest-centers-response";
    /// Text block showing a directions lookup.
    pub const DIRECTIONS_RESPONSE: &str = "directions-response";
    /// Manual latitude input.
    pub const MANUAL_LAT: &str = "manual-lat";
    /// Manual longitude input.
    pub const MANUAL_LON: &str = "manual-lon";
    /// Vehicle selection control.
    pub const VEHICLE_SELECT: &str = "vehicleSelect";
    /// Service selection control.
    pub const SERVICE_SELECT: &str = "serviceSelect";

    /// Every id above, for building a complete page.
    pub const ALL: [&str; 10] = [
        ALL_CENTERS,
        RECENTLY_VIEWED,
        NEAREST_OWNER_RESPONSE,
        NEAREST_CENTER_RESPONSE,
        NEAREST_CENTERS_RESPONSE,
        DIRECTIONS_RESPONSE,
        MANUAL_LAT,
        MANUAL_LON,
        VEHICLE_SELECT,
        SERVICE_SELECT,
    ];
}

/// Number of centers mirrored into the recently-viewed container.
pub const RECENTLY_VIEWED_LIMIT: usize = 3;

/// One `<option>` of a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value; empty for the placeholder.
    pub value: String,
    /// Visible label.
    pub label: String,
}

impl SelectOption {
    /// Leading option with an empty value.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
        }
    }
}

impl From<&Vehicle> for SelectOption {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            value: vehicle.id.to_string(),
            label: format!("{} {} ({})", vehicle.make, vehicle.model, vehicle.year),
        }
    }
}

impl From<&CenterService> for SelectOption {
    fn from(service: &CenterService) -> Self {
        Self {
            value: service.id.to_string(),
            label: format!("{} - ${}", service.name, service.price),
        }
    }
}

/// Card summarising one maintenance center.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterCard {
    /// Center name.
    pub name: String,
    /// Latitude shown on the card.
    pub latitude: f64,
    /// Longitude shown on the card.
    pub longitude: f64,
}

impl From<&MaintenanceCenter> for CenterCard {
    fn from(center: &MaintenanceCenter) -> Self {
        Self {
            name: center.name.clone(),
            latitude: center.latitude,
            longitude: center.longitude,
        }
    }
}

impl fmt::Display for CenterCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Location: {}, {}",
            self.name, self.latitude, self.longitude
        )
    }
}

/// Build the full option list for a vehicle selector.
pub fn vehicle_options(vehicles: &[Vehicle]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder("Select a vehicle"))
        .chain(vehicles.iter().map(SelectOption::from))
        .collect()
}

/// Build the full option list for a service selector.
pub fn service_options(services: &[CenterService]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder("Select a service"))
        .chain(services.iter().map(SelectOption::from))
        .collect()
}

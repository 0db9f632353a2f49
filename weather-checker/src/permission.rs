//! Location permission gate
//!
//! Checked once at startup. The outcome is logged and stored in state but no
//! other part of the app reads it.

use serde::Deserialize;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationPermission {
    Fine,
    Coarse,
}

impl LocationPermission {
    pub const ALL: [LocationPermission; 2] = [LocationPermission::Fine, LocationPermission::Coarse];

    pub fn name(self) -> &'static str {
        match self {
            LocationPermission::Fine => "ACCESS_FINE_LOCATION",
            LocationPermission::Coarse => "ACCESS_COARSE_LOCATION",
        }
    }
}

/// `[location]` section of the config file
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    pub fine: bool,
    pub coarse: bool,
}

impl LocationConfig {
    fn is_granted(&self, permission: LocationPermission) -> bool {
        match permission {
            LocationPermission::Fine => self.fine,
            LocationPermission::Coarse => self.coarse,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionStatus {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Either permission is enough. When neither is held, both are requested and
/// the request is recorded as denied.
pub fn check_location_permission(config: &LocationConfig) -> PermissionStatus {
    if let Some(held) = LocationPermission::ALL
        .into_iter()
        .find(|permission| config.is_granted(*permission))
    {
        info!(permission = held.name(), "location permission already granted");
        return PermissionStatus::Granted;
    }

    let requested: Vec<&str> = LocationPermission::ALL.iter().map(|p| p.name()).collect();
    info!(?requested, "location permission not granted, requesting");
    PermissionStatus::Denied
}

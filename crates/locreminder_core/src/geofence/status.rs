//! Geofence status codes and their user-facing messages.

use crate::model::reminder::ReminderId;
use thiserror::Error;

/// Platform status code: geofencing is unavailable.
pub const GEOFENCE_NOT_AVAILABLE: i32 = 1000;
/// Platform status code: the per-app geofence limit is reached.
pub const GEOFENCE_TOO_MANY_GEOFENCES: i32 = 1001;
/// Platform status code: too many pending callbacks are registered.
pub const GEOFENCE_TOO_MANY_PENDING_INTENTS: i32 = 1002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceStatus {
    NotAvailable,
    TooManyGeofences,
    TooManyPendingIntents,
    Unknown(i32),
}

impl GeofenceStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            GEOFENCE_NOT_AVAILABLE => Self::NotAvailable,
            GEOFENCE_TOO_MANY_GEOFENCES => Self::TooManyGeofences,
            GEOFENCE_TOO_MANY_PENDING_INTENTS => Self::TooManyPendingIntents,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::NotAvailable => GEOFENCE_NOT_AVAILABLE,
            Self::TooManyGeofences => GEOFENCE_TOO_MANY_GEOFENCES,
            Self::TooManyPendingIntents => GEOFENCE_TOO_MANY_PENDING_INTENTS,
            Self::Unknown(code) => code,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NotAvailable => {
                "Geofence service is not available now. Turn on high accuracy location."
            }
            Self::TooManyGeofences => "Too many geofences are registered. Remove some and retry.",
            Self::TooManyPendingIntents => {
                "Too many geofence requests are pending. Try again later."
            }
            Self::Unknown(_) => "Unknown geofence error.",
        }
    }
}

/// Failure to build or register a geofence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeofenceError {
    #[error("reminder `{0}` has no coordinates to watch")]
    MissingCoordinates(ReminderId),
    #[error("radius must be a positive number of meters, got {0}")]
    InvalidRadius(f32),
    /// The location service answered with a status code.
    #[error("{}", .0.message())]
    Status(GeofenceStatus),
    /// The location service failed without a status code.
    #[error("{}", GeofenceStatus::NotAvailable.message())]
    Service(String),
}

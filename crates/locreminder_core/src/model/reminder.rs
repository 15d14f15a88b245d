//! Reminder domain model.
//!
//! # Responsibility
//! - Define the canonical record stored by the reminder repository.
//!
//! # Invariants
//! - `id` is generated client-side and is immutable once created.
//! - `latitude` and `longitude` are either both set or both unset.
//! - Stored coordinates are finite and within WGS84 bounds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a reminder.
///
/// Kept as a string so identifiers issued by other clients (and the ids
/// echoed back by the geofencing service) round-trip untouched.
pub type ReminderId = String;

/// A location-triggered note persisted by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: Option<String>,
    /// Human-readable label of the picked place.
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Reminder {
    /// Creates a reminder with a freshly generated id and no location.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates a reminder with a caller-provided id.
    ///
    /// Used when the identity was already handed to the geofencing service.
    pub fn with_id(id: impl Into<ReminderId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Sets the description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the location label and coordinates together.
    pub fn located_at(mut self, label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.location = Some(label.into());
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Checks the invariants a store relies on.
    ///
    /// Title rules are not checked here; drafts enforce them before a
    /// reminder is created.
    pub fn check_storable(&self) -> Result<(), &'static str> {
        if self.id.trim().is_empty() {
            return Err("reminder id cannot be empty");
        }
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(latitude), Some(longitude)) => check_coordinates(latitude, longitude),
            _ => Err("latitude and longitude must be set together"),
        }
    }

    /// Returns `(latitude, longitude)` when a location has been picked.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
            _ => None,
        }
    }
}

/// SQLite stores a non-finite REAL as NULL, so those never reach a store.
fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(latitude.is_finite() && longitude.is_finite()) {
        return Err("coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("latitude must be within [-90, 90]");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("longitude must be within [-180, 180]");
    }
    Ok(())
}

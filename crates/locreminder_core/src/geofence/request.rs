//! Geofence request descriptor built from a reminder.

use crate::geofence::status::GeofenceError;
use crate::model::reminder::{Reminder, ReminderId};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_GEOFENCE_RADIUS_METERS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceTransition {
    Enter,
    Exit,
    Dwell,
}

/// Region parameters shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceSettings {
    pub radius_meters: f32,
    /// `None` means the geofence never expires.
    pub expiration: Option<Duration>,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_GEOFENCE_RADIUS_METERS,
            expiration: None,
        }
    }
}

/// Circular region the location service should watch for one reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceRequest {
    pub request_id: ReminderId,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f32,
    pub expiration: Option<Duration>,
    pub transition: GeofenceTransition,
    /// Fire immediately if the device is already inside the region.
    pub initial_trigger_on_enter: bool,
}

impl GeofenceRequest {
    pub fn for_reminder(
        reminder: &Reminder,
        settings: &GeofenceSettings,
    ) -> Result<Self, GeofenceError> {
        if !(settings.radius_meters.is_finite() && settings.radius_meters > 0.0) {
            return Err(GeofenceError::InvalidRadius(settings.radius_meters));
        }
        let (latitude, longitude) = reminder
            .coordinates()
            .ok_or_else(|| GeofenceError::MissingCoordinates(reminder.id.clone()))?;

        Ok(Self {
            request_id: reminder.id.clone(),
            latitude,
            longitude,
            radius_meters: settings.radius_meters,
            expiration: settings.expiration,
            transition: GeofenceTransition::Enter,
            initial_trigger_on_enter: true,
        })
    }
}

/// Registers geofences with the platform location service.
#[async_trait]
pub trait GeofenceRegistrar: Send + Sync {
    async fn add_geofence(&self, request: &GeofenceRequest) -> Result<(), GeofenceError>;
}

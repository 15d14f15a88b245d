//! Geofence transition handling.
//!
//! # Invariants
//! - Only `Enter` transitions produce notifications.
//! - Ids that no longer resolve to a reminder are skipped, never fatal.

use crate::geofence::request::GeofenceTransition;
use crate::geofence::status::GeofenceStatus;
use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::reminder_repo::ReminderDataSource;
use log::{info, warn};
use std::sync::Arc;

/// Event delivered by the location service.
#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceEvent {
    Transition {
        transition: GeofenceTransition,
        triggering_ids: Vec<ReminderId>,
    },
    Error(GeofenceStatus),
}

/// Payload handed to the platform notification layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderNotification {
    pub reminder_id: ReminderId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl From<Reminder> for ReminderNotification {
    fn from(reminder: Reminder) -> Self {
        Self {
            reminder_id: reminder.id,
            title: reminder.title,
            description: reminder.description,
            location: reminder.location,
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: ReminderNotification);
}

pub struct GeofenceTransitionHandler {
    data_source: Arc<dyn ReminderDataSource>,
    sink: Arc<dyn NotificationSink>,
}

impl GeofenceTransitionHandler {
    pub fn new(data_source: Arc<dyn ReminderDataSource>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { data_source, sink }
    }

    /// Handles one event and returns how many notifications were sent.
    pub async fn handle(&self, event: GeofenceEvent) -> usize {
        let triggering_ids = match event {
            GeofenceEvent::Error(status) => {
                warn!(
                    "event=geofence_transition module=geofence status=error error_code={}",
                    status.code()
                );
                return 0;
            }
            GeofenceEvent::Transition {
                transition: GeofenceTransition::Enter,
                triggering_ids,
            } => triggering_ids,
            GeofenceEvent::Transition { transition, .. } => {
                info!(
                    "event=geofence_transition module=geofence status=ignored transition={transition:?}"
                );
                return 0;
            }
        };

        let mut sent = 0;
        for id in &triggering_ids {
            match self.data_source.get_reminder(id).await {
                Ok(reminder) => {
                    self.sink.notify(reminder.into());
                    sent += 1;
                }
                Err(err) => warn!(
                    "event=geofence_transition module=geofence status=skipped error_code={}",
                    err.code()
                ),
            }
        }

        info!(
            "event=geofence_transition module=geofence status=ok triggered={} notified={}",
            triggering_ids.len(),
            sent
        );
        sent
    }
}

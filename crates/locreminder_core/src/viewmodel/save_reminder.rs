//! Save-reminder view-state controller.
//!
//! # Responsibility
//! - Hold the form fields of the reminder being created.
//! - Validate drafts, register the geofence and persist the reminder.
//!
//! # Invariants
//! - A reminder is persisted only after its geofence was registered when
//!   saving through `register_and_save`.
//! - A successful save always emits `ShowToast` before `Navigate(Back)`.

use crate::geofence::request::{GeofenceRegistrar, GeofenceRequest, GeofenceSettings};
use crate::model::draft::ReminderDraft;
use crate::model::reminder::Reminder;
use crate::repo::reminder_repo::ReminderDataSource;
use crate::viewmodel::events::{Destination, EventBus, NavigationCommand, UiEvent};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

pub const REMINDER_SAVED_MESSAGE: &str = "Reminder Saved !";

/// Form snapshot observed by the save screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReminderState {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub loading: bool,
}

pub struct SaveReminderController {
    data_source: Arc<dyn ReminderDataSource>,
    geofence: GeofenceSettings,
    state: watch::Sender<SaveReminderState>,
    events: EventBus,
}

impl SaveReminderController {
    pub fn new(data_source: Arc<dyn ReminderDataSource>, geofence: GeofenceSettings) -> Self {
        let (state, _) = watch::channel(SaveReminderState::default());
        Self {
            data_source,
            geofence,
            state,
            events: EventBus::new(),
        }
    }

    pub fn state(&self) -> watch::Receiver<SaveReminderState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SaveReminderState {
        self.state.borrow().clone()
    }

    pub fn events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.send_modify(|state| state.title = Some(title));
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.state
            .send_modify(|state| state.description = Some(description));
    }

    /// Asks the UI to open the map picker.
    pub fn request_location_selection(&self) {
        self.events.emit(UiEvent::Navigate(NavigationCommand::To(
            Destination::SelectLocation,
        )));
    }

    /// Stores the picked place and returns to the form.
    pub fn select_location(&self, label: impl Into<String>, latitude: f64, longitude: f64) {
        let label = label.into();
        self.state.send_modify(|state| {
            state.location = Some(label);
            state.latitude = Some(latitude);
            state.longitude = Some(longitude);
        });
        self.events.emit(UiEvent::Navigate(NavigationCommand::Back));
    }

    /// Builds a draft from the current form fields with a fresh id.
    pub fn current_draft(&self) -> ReminderDraft {
        let state = self.state.borrow();
        ReminderDraft {
            title: state.title.clone(),
            description: state.description.clone(),
            location: state.location.clone(),
            latitude: state.latitude,
            longitude: state.longitude,
            ..ReminderDraft::new()
        }
    }

    /// Resets every form field. `loading` is left as is.
    pub fn on_clear(&self) {
        self.state.send_modify(|state| {
            *state = SaveReminderState {
                loading: state.loading,
                ..SaveReminderState::default()
            };
        });
    }

    /// Returns false and shows a snackbar when the draft is incomplete.
    pub fn validate_entered_data(&self, draft: &ReminderDraft) -> bool {
        match draft.validate() {
            Ok(()) => true,
            Err(err) => {
                self.events.emit(UiEvent::ShowSnackBar(err.to_string()));
                false
            }
        }
    }

    /// Persists a reminder and reports the outcome to the UI.
    ///
    /// Returns true when the reminder was stored.
    pub async fn save_reminder(&self, reminder: &Reminder) -> bool {
        self.state.send_modify(|state| state.loading = true);
        let _loading = scopeguard::guard((), |()| {
            self.state.send_modify(|state| state.loading = false);
        });

        match self.data_source.save_reminder(reminder).await {
            Ok(()) => {
                info!("event=reminder_save module=viewmodel status=ok");
                self.events
                    .emit(UiEvent::ShowToast(REMINDER_SAVED_MESSAGE.to_string()));
                self.events.emit(UiEvent::Navigate(NavigationCommand::Back));
                true
            }
            Err(err) => {
                warn!(
                    "event=reminder_save module=viewmodel status=error error_code={}",
                    err.code()
                );
                self.events.emit(UiEvent::ShowSnackBar(err.to_string()));
                false
            }
        }
    }

    /// Validates then saves without registering a geofence.
    pub async fn validate_and_save(&self, draft: ReminderDraft) -> bool {
        match self.accept_draft(draft) {
            Some(reminder) => self.save_reminder(&reminder).await,
            None => false,
        }
    }

    /// Validates, registers the geofence, and saves once registration
    /// succeeded.
    pub async fn register_and_save(
        &self,
        draft: ReminderDraft,
        registrar: &dyn GeofenceRegistrar,
    ) -> bool {
        let Some(reminder) = self.accept_draft(draft) else {
            return false;
        };

        let registered = match GeofenceRequest::for_reminder(&reminder, &self.geofence) {
            Ok(request) => registrar.add_geofence(&request).await,
            Err(err) => Err(err),
        };
        if let Err(err) = registered {
            warn!("event=geofence_add module=viewmodel status=error error={err}");
            self.events.emit(UiEvent::ShowToast(err.to_string()));
            return false;
        }

        info!("event=geofence_add module=viewmodel status=ok");
        self.save_reminder(&reminder).await
    }

    fn accept_draft(&self, draft: ReminderDraft) -> Option<Reminder> {
        match draft.into_reminder() {
            Ok(reminder) => Some(reminder),
            Err(err) => {
                self.events.emit(UiEvent::ShowSnackBar(err.to_string()));
                None
            }
        }
    }
}

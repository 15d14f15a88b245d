//! Reminder list view-state controller.
//!
//! # Responsibility
//! - Run load cycles on activation and on explicit refresh.
//! - Project `get_reminders()` results into `RemindersListState`.
//!
//! # Invariants
//! - `show_empty` is only recomputed after a successful load.
//! - Overlapping refreshes are not coordinated; the last one to finish
//!   wins.

use crate::model::reminder::Reminder;
use crate::repo::reminder_repo::ReminderDataSource;
use crate::viewmodel::events::{Destination, EventBus, NavigationCommand, UiEvent};
use log::{info, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Snapshot observed by the reminder list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemindersListState {
    pub loading: bool,
    pub reminders: Vec<Reminder>,
    /// True iff the last successful load returned no reminders.
    pub show_empty: bool,
    /// Message of the most recent failed load, cleared by a successful one.
    pub error_message: Option<String>,
}

pub struct RemindersListController {
    data_source: Arc<dyn ReminderDataSource>,
    state: watch::Sender<RemindersListState>,
    events: EventBus,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl RemindersListController {
    pub fn new(data_source: Arc<dyn ReminderDataSource>) -> Self {
        let (state, _) = watch::channel(RemindersListState::default());
        Self {
            data_source,
            state,
            events: EventBus::new(),
            in_flight: Mutex::new(Vec::new()),
        }
    }

    /// Subscribes to state snapshots. The receiver starts at the current one.
    pub fn state(&self) -> watch::Receiver<RemindersListState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> RemindersListState {
        self.state.borrow().clone()
    }

    pub fn events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    /// Runs one load cycle to completion.
    ///
    /// `loading` is raised before the data source is called and cleared by a
    /// scope guard, so it also drops back to `false` when this future is
    /// cancelled mid-flight.
    pub async fn load_reminders(&self) {
        let started_at = Instant::now();
        self.state.send_modify(|state| state.loading = true);
        let _loading = scopeguard::guard((), |()| {
            self.state.send_modify(|state| state.loading = false);
        });

        match self.data_source.get_reminders().await {
            Ok(reminders) => {
                info!(
                    "event=reminders_load module=viewmodel status=ok count={} duration_ms={}",
                    reminders.len(),
                    started_at.elapsed().as_millis()
                );
                self.state.send_modify(|state| {
                    state.show_empty = reminders.is_empty();
                    state.reminders = reminders;
                    state.error_message = None;
                });
            }
            Err(err) => {
                warn!(
                    "event=reminders_load module=viewmodel status=error error_code={} duration_ms={}",
                    err.code(),
                    started_at.elapsed().as_millis()
                );
                let message = err.to_string();
                self.state
                    .send_modify(|state| state.error_message = Some(message.clone()));
                self.events.emit(UiEvent::ShowSnackBar(message));
            }
        }
    }

    /// Starts a load cycle in the background and tracks it for `shutdown`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn refresh(self: &Arc<Self>) {
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move { this.load_reminders().await });

        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(handle);
    }

    /// Asks the UI to open the save screen.
    pub fn navigate_to_add_reminder(&self) {
        self.events.emit(UiEvent::Navigate(NavigationCommand::To(
            Destination::SaveReminder,
        )));
    }

    /// Cancels every tracked refresh. Call when the owning screen goes away.
    pub fn shutdown(&self) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let cancelled = in_flight.len();
        for task in in_flight.drain(..) {
            task.abort();
        }
        info!("event=reminders_shutdown module=viewmodel status=ok cancelled={cancelled}");
    }
}

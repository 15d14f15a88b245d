//! Core domain logic for the location reminder app.
//! Repository, view-state controllers and geofence glue live here; platform
//! UI, maps and OS location services stay outside.

pub mod config;
pub mod db;
pub mod geofence;
pub mod logging;
pub mod model;
pub mod repo;
pub mod viewmodel;

pub use config::{ConfigError, CoreConfig};
pub use geofence::request::{
    GeofenceRegistrar, GeofenceRequest, GeofenceSettings, GeofenceTransition,
};
pub use geofence::status::{GeofenceError, GeofenceStatus};
pub use geofence::transition::{
    GeofenceEvent, GeofenceTransitionHandler, NotificationSink, ReminderNotification,
};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogSettings,
    LoggingError,
};
pub use model::draft::{DraftError, ReminderDraft};
pub use model::reminder::{Reminder, ReminderId};
pub use repo::error::{RepoError, RepoResult, NOT_FOUND_MESSAGE};
pub use repo::memory_store::InMemoryReminderStore;
pub use repo::reminder_repo::{LocalReminderRepository, ReminderDataSource};
pub use repo::sqlite_store::SqliteReminderStore;
pub use repo::store::ReminderStore;
pub use viewmodel::events::{Destination, NavigationCommand, UiEvent};
pub use viewmodel::reminders_list::{RemindersListController, RemindersListState};
pub use viewmodel::save_reminder::{SaveReminderController, SaveReminderState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

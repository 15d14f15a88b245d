//! Geofence request shape, status mapping and transition handling.
//!
//! # Responsibility
//! - Describe the region the platform should watch for one reminder.
//! - Map platform status codes to user-facing messages.
//! - Turn "entered region" events into reminder notifications.
//!
//! # Invariants
//! - A geofence request id is always the reminder id.
//! - Registration itself is delegated to a `GeofenceRegistrar`; core never
//!   talks to the OS location service.

pub mod request;
pub mod status;
pub mod transition;

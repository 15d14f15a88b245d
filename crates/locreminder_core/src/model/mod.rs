//! Domain model for location reminders.
//!
//! # Responsibility
//! - Define the persisted reminder record and the UI-facing draft.
//! - Keep draft validation rules next to the data they guard.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId` assigned at
//!   creation time and never reused.
//! - Only validated drafts become persisted reminders.

pub mod draft;
pub mod reminder;

//! View-state controllers.
//!
//! # Responsibility
//! - Turn data source results into observable UI state snapshots.
//! - Publish transient UI events (snackbar, toast, navigation) in order.
//!
//! # Invariants
//! - `loading` is cleared on every exit path of a load or save cycle,
//!   including cancellation.
//! - Publishing with no live UI subscriber is a no-op.

pub mod events;
pub mod reminders_list;
pub mod save_reminder;

//! Repository layer: storage backends and the async reminder data source.
//!
//! # Responsibility
//! - Define the synchronous storage capability (`ReminderStore`).
//! - Wrap it in the async `ReminderDataSource` contract used by controllers.
//!
//! # Invariants
//! - Every data source call resolves to `RepoResult`; storage faults never
//!   escape as panics.
//! - Not-found lookups carry the fixed message `Reminder not found`.

pub mod error;
pub mod memory_store;
pub mod reminder_repo;
pub mod sqlite_store;
pub mod store;

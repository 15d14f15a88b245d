//! Storage backend capability.

use crate::model::reminder::Reminder;
use crate::repo::error::RepoResult;

/// Durable keyed storage for reminders.
///
/// Implementations are synchronous; `LocalReminderRepository` runs them on
/// the blocking pool and serializes access.
///
/// # Contract
/// - `upsert` replaces any reminder with the same id; the replaced reminder
///   moves to the end of `list` order.
/// - `list` returns reminders in insertion order.
/// - `clear` on an empty store succeeds and returns `0`.
pub trait ReminderStore: Send {
    fn upsert(&mut self, reminder: &Reminder) -> RepoResult<()>;
    fn find(&self, id: &str) -> RepoResult<Option<Reminder>>;
    fn list(&self) -> RepoResult<Vec<Reminder>>;
    /// Removes every reminder and returns how many were removed.
    fn clear(&mut self) -> RepoResult<usize>;
}


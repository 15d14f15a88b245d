//! List-backed in-memory store.

use crate::model::reminder::Reminder;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::store::ReminderStore;

/// In-memory `ReminderStore` keeping reminders in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryReminderStore {
    reminders: Vec<Reminder>,
}

impl InMemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

impl ReminderStore for InMemoryReminderStore {
    fn upsert(&mut self, reminder: &Reminder) -> RepoResult<()> {
        reminder
            .check_storable()
            .map_err(|reason| RepoError::InvalidData(reason.to_string()))?;
        self.reminders.retain(|existing| existing.id != reminder.id);
        self.reminders.push(reminder.clone());
        Ok(())
    }

    fn find(&self, id: &str) -> RepoResult<Option<Reminder>> {
        Ok(self.reminders.iter().find(|item| item.id == id).cloned())
    }

    fn list(&self) -> RepoResult<Vec<Reminder>> {
        Ok(self.reminders.clone())
    }

    fn clear(&mut self) -> RepoResult<usize> {
        let removed = self.reminders.len();
        self.reminders.clear();
        Ok(removed)
    }
}

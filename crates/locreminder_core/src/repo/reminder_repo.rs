//! Async reminder data source and its local implementation.
//!
//! # Responsibility
//! - Expose save/get/list/clear as suspending calls for view-state
//!   controllers.
//! - Move synchronous store work off the caller's task.
//!
//! # Invariants
//! - The repository keeps no cached copy; every read hits the store.
//! - Store access is serialized through one lock.
//! - Worker failures and lock poisoning are reported as `RepoError`.
//! - Poisoning is permanent for the repository instance.

use crate::model::reminder::Reminder;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::store::ReminderStore;
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Reminder CRUD contract consumed by controllers and geofence handlers.
///
/// # Errors
/// Once a call has panicked inside the backend, the data source may stop
/// serving requests: `LocalReminderRepository` answers every later call with
/// `RepoError::StoreUnavailable` for the rest of its lifetime. Callers that
/// need to recover must build a new repository over a freshly opened store.
#[async_trait]
pub trait ReminderDataSource: Send + Sync {
    /// Returns every reminder in insertion order. Empty store yields `Ok(vec![])`.
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>>;
    /// Inserts or replaces the reminder keyed by its id.
    async fn save_reminder(&self, reminder: &Reminder) -> RepoResult<()>;
    /// Returns `RepoError::NotFound` when no reminder has this id.
    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder>;
    /// Removes every reminder. Succeeds on an empty store.
    async fn delete_all_reminders(&self) -> RepoResult<()>;
}

/// `ReminderDataSource` backed by a local `ReminderStore`.
///
/// A store call that panics poisons the lock. The store may hold a
/// half-applied write at that point, so it is never touched again and every
/// later call fails with `StoreUnavailable`.
#[derive(Clone)]
pub struct LocalReminderRepository {
    store: Arc<Mutex<Box<dyn ReminderStore>>>,
}

impl LocalReminderRepository {
    pub fn new<S: ReminderStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    async fn run<T, F>(&self, operation: &'static str, work: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn ReminderStore) -> RepoResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || {
            let mut guard = store.lock().map_err(|_| RepoError::StoreUnavailable)?;
            work(guard.as_mut())
        })
        .await
        .unwrap_or_else(|err| Err(RepoError::Worker(err.to_string())));

        match &result {
            Ok(_) => debug!(
                "event=reminder_{operation} module=repo status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) if err.is_not_found() => debug!(
                "event=reminder_{operation} module=repo status=not_found duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=reminder_{operation} module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }
}

#[async_trait]
impl ReminderDataSource for LocalReminderRepository {
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>> {
        self.run("list", |store| store.list()).await
    }

    async fn save_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        let reminder = reminder.clone();
        self.run("save", move |store| store.upsert(&reminder)).await
    }

    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder> {
        let id = id.to_string();
        self.run("get", move |store| {
            store.find(&id)?.ok_or(RepoError::NotFound(id))
        })
        .await
    }

    async fn delete_all_reminders(&self) -> RepoResult<()> {
        self.run("clear", |store| store.clear().map(|_| ())).await
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalReminderRepository, ReminderDataSource};
    use crate::model::reminder::Reminder;
    use crate::repo::error::{RepoError, RepoResult};
    use crate::repo::memory_store::InMemoryReminderStore;
    use crate::repo::store::ReminderStore;

    struct PanickingStore;

    impl ReminderStore for PanickingStore {
        fn upsert(&mut self, _reminder: &Reminder) -> RepoResult<()> {
            panic!("disk on fire");
        }

        fn find(&self, _id: &str) -> RepoResult<Option<Reminder>> {
            Ok(None)
        }

        fn list(&self) -> RepoResult<Vec<Reminder>> {
            Ok(Vec::new())
        }

        fn clear(&mut self) -> RepoResult<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn get_reminder_maps_missing_id_to_not_found() {
        let repo = LocalReminderRepository::new(InMemoryReminderStore::new());
        let err = repo.get_reminder("missing").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ref id) if id == "missing"));
        assert_eq!(err.to_string(), "Reminder not found");
    }

    #[tokio::test]
    async fn panicking_store_stays_unavailable_for_later_calls() {
        let repo = LocalReminderRepository::new(PanickingStore);

        let first = repo.save_reminder(&Reminder::new("x")).await.unwrap_err();
        assert!(matches!(first, RepoError::Worker(_)));

        for _ in 0..3 {
            let later = repo.get_reminders().await.unwrap_err();
            assert!(matches!(later, RepoError::StoreUnavailable));
        }
        let lookup = repo.get_reminder("any").await.unwrap_err();
        assert!(matches!(lookup, RepoError::StoreUnavailable));
        assert!(!lookup.is_not_found());
    }
}

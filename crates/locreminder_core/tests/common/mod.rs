#![allow(dead_code)]

use async_trait::async_trait;
use locreminder_core::{RepoError, RepoResult, Reminder, ReminderDataSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::{Notify, Semaphore};

/// List-backed data source that can be switched into a failing mode.
#[derive(Default)]
pub struct FakeDataSource {
    reminders: Mutex<Vec<Reminder>>,
    should_fail: AtomicBool,
}

impl FakeDataSource {
    pub fn with(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: Mutex::new(reminders),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, value: bool) {
        self.should_fail.store(value, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<Reminder> {
        self.reminders.lock().unwrap().clone()
    }

    fn check(&self) -> RepoResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(RepoError::StoreUnavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl ReminderDataSource for FakeDataSource {
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>> {
        self.check()?;
        Ok(self.stored())
    }

    async fn save_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        self.check()?;
        self.reminders.lock().unwrap().push(reminder.clone());
        Ok(())
    }

    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder> {
        self.check()?;
        self.stored()
            .into_iter()
            .find(|reminder| reminder.id == id)
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    async fn delete_all_reminders(&self) -> RepoResult<()> {
        self.check()?;
        self.reminders.lock().unwrap().clear();
        Ok(())
    }
}

/// Data source whose `get_reminders` parks until the test releases it.
pub struct GatedDataSource {
    inner: FakeDataSource,
    pub entered: Notify,
    release: Semaphore,
}

impl GatedDataSource {
    pub fn new(inner: FakeDataSource) -> Self {
        Self {
            inner,
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    pub fn release(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl ReminderDataSource for GatedDataSource {
    async fn get_reminders(&self) -> RepoResult<Vec<Reminder>> {
        self.entered.notify_one();
        let _permit = self.release.acquire().await.expect("gate closed");
        self.inner.get_reminders().await
    }

    async fn save_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        self.inner.save_reminder(reminder).await
    }

    async fn get_reminder(&self, id: &str) -> RepoResult<Reminder> {
        self.inner.get_reminder(id).await
    }

    async fn delete_all_reminders(&self) -> RepoResult<()> {
        self.inner.delete_all_reminders().await
    }
}

pub fn three_reminders() -> Vec<Reminder> {
    vec![
        Reminder::new("Title1")
            .described("Description1")
            .located_at("Pak Datuk", 1.6765196982043675, 101.44888919150442),
        Reminder::new("Title2")
            .described("Description2")
            .located_at("Lala", 11.6765196982043675, 111.44888919150442),
        Reminder::new("Title3")
            .described("Description3")
            .located_at("Tata", 12.6765196982043675, 121.44888919150442),
    ]
}

mod common;

use common::three_reminders;
use locreminder_core::db::migrations::latest_version;
use locreminder_core::db::open_db_in_memory;
use locreminder_core::{
    InMemoryReminderStore, LocalReminderRepository, RepoError, Reminder, ReminderDataSource,
    ReminderStore, SqliteReminderStore, NOT_FOUND_MESSAGE,
};
use rusqlite::Connection;

fn sqlite_repo() -> LocalReminderRepository {
    let conn = open_db_in_memory().unwrap();
    LocalReminderRepository::new(SqliteReminderStore::try_new(conn).unwrap())
}

fn repos() -> Vec<(&'static str, LocalReminderRepository)> {
    vec![
        ("sqlite", sqlite_repo()),
        (
            "memory",
            LocalReminderRepository::new(InMemoryReminderStore::new()),
        ),
    ]
}

#[tokio::test]
async fn save_then_get_by_id_returns_every_field() {
    for (backend, repo) in repos() {
        let reminder = Reminder::new("Title1")
            .described("Description1")
            .located_at("Pak Datuk", 1.6765196982043675, 101.44888919150442);
        repo.save_reminder(&reminder).await.unwrap();

        let loaded = repo.get_reminder(&reminder.id).await.unwrap();
        assert_eq!(loaded, reminder, "backend {backend}");
    }
}

#[tokio::test]
async fn reminder_without_optional_fields_round_trips() {
    for (backend, repo) in repos() {
        let reminder = Reminder::new("bare");
        repo.save_reminder(&reminder).await.unwrap();

        let loaded = repo.get_reminder(&reminder.id).await.unwrap();
        assert_eq!(loaded, reminder, "backend {backend}");
    }
}

#[tokio::test]
async fn get_reminders_keeps_insertion_order() {
    for (backend, repo) in repos() {
        let reminders = three_reminders();
        for reminder in &reminders {
            repo.save_reminder(reminder).await.unwrap();
        }

        let loaded = repo.get_reminders().await.unwrap();
        assert_eq!(loaded.len(), 3, "backend {backend}");
        assert_eq!(loaded.first().unwrap().id, reminders[0].id);
        assert_eq!(loaded.last().unwrap().id, reminders[2].id);
    }
}

#[tokio::test]
async fn saving_same_id_overwrites_last_write_wins() {
    for (backend, repo) in repos() {
        let original = Reminder::with_id("fixed-id", "first");
        let other = Reminder::new("other");
        repo.save_reminder(&original).await.unwrap();
        repo.save_reminder(&other).await.unwrap();
        repo.save_reminder(&Reminder::with_id("fixed-id", "second"))
            .await
            .unwrap();

        let loaded = repo.get_reminders().await.unwrap();
        assert_eq!(loaded.len(), 2, "backend {backend}");
        assert_eq!(loaded[0].id, other.id, "backend {backend}");
        assert_eq!(loaded[1].title, "second", "backend {backend}");
    }
}

#[tokio::test]
async fn clear_leaves_an_empty_success() {
    for (backend, repo) in repos() {
        for reminder in &three_reminders() {
            repo.save_reminder(reminder).await.unwrap();
        }

        repo.delete_all_reminders().await.unwrap();
        let loaded = repo.get_reminders().await.unwrap();
        assert!(loaded.is_empty(), "backend {backend}");
    }
}

#[tokio::test]
async fn clear_is_idempotent_on_empty_store() {
    for (backend, repo) in repos() {
        repo.delete_all_reminders().await.unwrap();
        assert!(repo.get_reminders().await.unwrap().is_empty(), "backend {backend}");
        repo.delete_all_reminders().await.unwrap();
        assert!(repo.get_reminders().await.unwrap().is_empty(), "backend {backend}");
    }
}

#[tokio::test]
async fn missing_id_yields_not_found_message() {
    for (backend, repo) in repos() {
        let err = repo.get_reminder("missing").await.unwrap_err();
        assert!(err.is_not_found(), "backend {backend}");
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(err.to_string(), "Reminder not found");
    }
}

#[tokio::test]
async fn empty_store_lists_as_empty_success() {
    for (backend, repo) in repos() {
        let loaded = repo.get_reminders().await;
        assert!(matches!(loaded, Ok(ref list) if list.is_empty()), "backend {backend}");
    }
}

#[tokio::test]
async fn save_rejects_half_located_reminder() {
    for (backend, repo) in repos() {
        let mut reminder = Reminder::new("half");
        reminder.latitude = Some(3.0);

        let err = repo.save_reminder(&reminder).await.unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)), "backend {backend}");
        assert!(repo.get_reminders().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn unusable_coordinates_are_rejected_and_list_stays_readable() {
    for (backend, repo) in repos() {
        let good = Reminder::new("good").located_at("Pak Datuk", 1.67, 101.44);
        repo.save_reminder(&good).await.unwrap();

        let rejected = [
            Reminder::new("nan").located_at("B", f64::NAN, 2.0),
            Reminder::new("inf").located_at("C", 1.0, f64::NEG_INFINITY),
            Reminder::new("north").located_at("D", 101.2, 101.1),
        ];
        for reminder in &rejected {
            let err = repo.save_reminder(reminder).await.unwrap_err();
            assert!(
                matches!(err, RepoError::InvalidData(_)),
                "backend {backend}: {} saved as {err:?}",
                reminder.title
            );
            assert!(repo.get_reminder(&reminder.id).await.unwrap_err().is_not_found());
        }

        let loaded = repo.get_reminders().await.unwrap();
        assert_eq!(loaded, vec![good], "backend {backend}");
    }
}

#[test]
fn sqlite_store_reports_corrupt_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteReminderStore::try_new(conn).unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO reminders (id, title, latitude) VALUES ('broken', 'x', 1.0);",
            [],
        )
        .unwrap();

    assert!(matches!(store.list(), Err(RepoError::InvalidData(_))));
    assert!(matches!(store.find("broken"), Err(RepoError::InvalidData(_))));
}

#[test]
fn sqlite_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteReminderStore::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn sqlite_store_rejects_connection_without_reminders_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteReminderStore::try_new(conn),
        Err(RepoError::MissingRequiredTable("reminders"))
    ));
}

#[tokio::test]
async fn reminders_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.sqlite3");
    let reminders = three_reminders();

    {
        let repo = LocalReminderRepository::new(SqliteReminderStore::open(&path).unwrap());
        for reminder in &reminders {
            repo.save_reminder(reminder).await.unwrap();
        }
    }

    let reopened = LocalReminderRepository::new(SqliteReminderStore::open(&path).unwrap());
    let loaded = reopened.get_reminders().await.unwrap();
    assert_eq!(loaded, reminders);
}

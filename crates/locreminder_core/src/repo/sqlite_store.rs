//! SQLite-backed reminder store.
//!
//! # Responsibility
//! - Keep SQL details for the `reminders` table inside this module.
//! - Refuse connections that were not bootstrapped through `db::open_db*`.
//!
//! # Invariants
//! - Writes use insert-or-replace keyed by `id`.
//! - Reads reject malformed rows instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::open_db;
use crate::model::reminder::Reminder;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::store::ReminderStore;
use rusqlite::{params, Connection, Row};
use std::path::Path;

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    location,
    latitude,
    longitude
FROM reminders";

/// `ReminderStore` over an owned, migrated SQLite connection.
pub struct SqliteReminderStore {
    conn: Connection,
}

impl SqliteReminderStore {
    /// Wraps a connection that already has the latest schema applied.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` when the `reminders` table is absent.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Self::try_new(conn)
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReminderStore for SqliteReminderStore {
    fn upsert(&mut self, reminder: &Reminder) -> RepoResult<()> {
        reminder
            .check_storable()
            .map_err(|reason| RepoError::InvalidData(reason.to_string()))?;

        self.conn.execute(
            "INSERT OR REPLACE INTO reminders (
                id,
                title,
                description,
                location,
                latitude,
                longitude
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                reminder.id.as_str(),
                reminder.title.as_str(),
                reminder.description.as_deref(),
                reminder.location.as_deref(),
                reminder.latitude,
                reminder.longitude,
            ],
        )?;
        Ok(())
    }

    fn find(&self, id: &str) -> RepoResult<Option<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }
        Ok(reminders)
    }

    fn clear(&mut self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM reminders;", [])?;
        Ok(removed)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let has_table: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'reminders'
        );",
        [],
        |row| row.get(0),
    )?;
    if has_table == 0 {
        return Err(RepoError::MissingRequiredTable("reminders"));
    }
    Ok(())
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let reminder = Reminder {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    };
    reminder.check_storable().map_err(|reason| {
        RepoError::InvalidData(format!("row `{}` in reminders: {reason}", reminder.id))
    })?;
    Ok(reminder)
}

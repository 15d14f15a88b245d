//! Reminder schema migrations.
//!
//! # Invariants
//! - Steps are listed in strictly increasing `version` order.
//! - `PRAGMA user_version` always equals the last applied step.
//! - A connection is migrated fully or not at all.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "reminders",
    sql: include_str!("0001_reminders.sql"),
}];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the connection up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when a step fails; nothing from the failed run is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = read_user_version(conn)?;
    let to_version = latest_version();

    match from_version.cmp(&to_version) {
        std::cmp::Ordering::Greater => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: from_version,
                latest_supported: to_version,
            })
        }
        std::cmp::Ordering::Equal => return Ok(()),
        std::cmp::Ordering::Less => {}
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().skip_while(|step| step.version <= from_version) {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={to_version}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    debug!(
        "event=db_migrate_step module=db status=start version={} name={}",
        step.version, step.name
    );
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    Ok(())
}

fn read_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

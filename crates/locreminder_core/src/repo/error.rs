//! Repository error taxonomy.

use crate::db::DbError;
use crate::model::reminder::ReminderId;
use thiserror::Error;

/// Message carried by every not-found outcome. UI layers match on it.
pub const NOT_FOUND_MESSAGE: &str = "Reminder not found";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// Lookup by id found nothing. Display never includes the id.
    #[error("Reminder not found")]
    NotFound(ReminderId),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted reminder data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} does not match expected {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    /// A previous store call panicked while holding the store lock.
    #[error("reminder store is unavailable")]
    StoreUnavailable,
    /// The blocking task running the store call failed or was cancelled.
    #[error("reminder store worker failed: {0}")]
    Worker(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns true for the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Db(_) => "db_error",
            Self::InvalidData(_) => "invalid_data",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::StoreUnavailable => "store_unavailable",
            Self::Worker(_) => "worker_failed",
        }
    }
}

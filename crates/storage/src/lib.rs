//! # Storage Layer
//!
//! The persistence boundary of the review assignment service.
//!
//! Three narrow repositories (pull requests, teams, users) are exposed
//! through a transactional handle: every logical service operation acquires
//! one [`Tx`] via [`TxManager::with_tx`], reads and writes through it, and
//! the manager commits on success or rolls back on any error.
//!
//! Absent rows surface as [`StorageError::NotFound`] and unique-constraint
//! violations as [`StorageError::AlreadyExists`]; callers translate those
//! sentinels into the domain taxonomy.

mod repos;
mod tx;

pub mod traits;

pub use traits::{PullRequestRepo, TeamRepo, Tx, TxFuture, TxManager, UserRepo};
pub use tx::PgTxManager;

use sea_orm::{DbErr, SqlErr};

/// Errors produced by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A unique constraint rejected the write.
    #[error("already exists")]
    AlreadyExists,

    /// Any other driver-level failure.
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StorageError {
    /// Classify a write error: unique-constraint violations become the
    /// `AlreadyExists` sentinel, everything else passes through.
    #[must_use]
    pub fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StorageError::AlreadyExists,
            _ => StorageError::Db(err),
        }
    }

    /// Classify an update error: zero affected rows means the row is gone.
    #[must_use]
    pub fn from_update(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotUpdated => StorageError::NotFound,
            other => StorageError::Db(other),
        }
    }
}

//! # Storage Contracts
//!
//! Repository and transaction traits consumed by the assignment service.
//! The Postgres implementations live in this crate; the service tests
//! substitute in-memory implementations.

use std::{future::Future, pin::Pin};

use async_trait::async_trait;
use domain::{
    PullRequest,
    PullRequestShort,
    PullRequestStats,
    Team,
    TeamStats,
    User,
    UserStats,
};
use error::AppError;

use crate::StorageError;

/// Boxed future returned by transactional closures and [`TxManager::with_tx`].
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>;

/// Pull request store, scoped to one transaction.
#[async_trait]
pub trait PullRequestRepo: Send + Sync {
    /// Insert a new pull request. `AlreadyExists` on id collision.
    async fn create(&self, pr: &PullRequest) -> Result<(), StorageError>;

    /// Load a pull request, locking its row for the rest of the
    /// transaction so concurrent mutators of the same PR serialize.
    async fn get_by_id(&self, id: &str) -> Result<PullRequest, StorageError>;

    /// Short projections of every PR listing `reviewer_id` as an assigned
    /// reviewer, open and merged alike. An empty list is not an error.
    async fn get_assignments(&self, reviewer_id: &str) -> Result<Vec<PullRequestShort>, StorageError>;

    /// Persist the full row. `NotFound` when the row vanished.
    async fn update(&self, pr: &PullRequest) -> Result<(), StorageError>;

    /// Aggregate totals and reviewer-count buckets.
    async fn stats(&self) -> Result<PullRequestStats, StorageError>;
}

/// Team store, scoped to one transaction.
#[async_trait]
pub trait TeamRepo: Send + Sync {
    /// Insert a team row. `AlreadyExists` on name collision.
    async fn create(&self, team: &Team) -> Result<(), StorageError>;

    /// Load a team and its member roster.
    async fn get_by_name(&self, name: &str) -> Result<Team, StorageError>;

    /// Aggregate per-team membership and PR counts.
    async fn stats(&self) -> Result<TeamStats, StorageError>;
}

/// User store, scoped to one transaction.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_by_id(&self, user_id: &str) -> Result<User, StorageError>;

    /// Persist the full row. `NotFound` when the row vanished.
    async fn update(&self, user: &User) -> Result<(), StorageError>;

    /// Insert-or-update every user in the batch.
    async fn upsert_batch(&self, users: &[User]) -> Result<(), StorageError>;

    /// Aggregate totals and per-user review load.
    async fn stats(&self) -> Result<UserStats, StorageError>;
}

/// Transactional handle exposing the three repositories bound to one
/// open transaction. Single-use: it does not outlive the `with_tx` call.
pub trait Tx: Send + Sync {
    fn pull_requests(&self) -> &dyn PullRequestRepo;
    fn teams(&self) -> &dyn TeamRepo;
    fn users(&self) -> &dyn UserRepo;
}

/// Transaction manager: runs a closure inside exactly one transaction.
///
/// Commits when the closure returns `Ok`, rolls back on `Err` (and on drop
/// if the future is cancelled mid-flight). Never commits twice.
pub trait TxManager: Send + Sync {
    fn with_tx<'m, T, F>(&'m self, f: F) -> TxFuture<'m, T>
    where
        T: Send + 'm,
        F: for<'t> FnOnce(&'t (dyn Tx + 't)) -> TxFuture<'t, T> + Send + 'm;
}

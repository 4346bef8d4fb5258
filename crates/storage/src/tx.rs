//! # Postgres Transaction Manager
//!
//! Binds the three repositories to a Sea-ORM transaction and enforces the
//! commit/rollback discipline: at most one commit per logical operation,
//! rollback on any error.

use error::AppError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    repos::{PgPullRequestRepo, PgTeamRepo, PgUserRepo},
    traits::{PullRequestRepo, TeamRepo, Tx, TxFuture, TxManager, UserRepo},
};

/// Transaction manager over a pooled Postgres connection.
#[derive(Debug, Clone)]
pub struct PgTxManager {
    db: DatabaseConnection,
}

impl PgTxManager {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
        }
    }
}

/// The repositories bound to one open transaction.
struct PgTx<'t> {
    pull_requests: PgPullRequestRepo<'t>,
    teams:         PgTeamRepo<'t>,
    users:         PgUserRepo<'t>,
}

impl<'t> PgTx<'t> {
    fn new(txn: &'t DatabaseTransaction) -> Self {
        Self {
            pull_requests: PgPullRequestRepo::new(txn),
            teams:         PgTeamRepo::new(txn),
            users:         PgUserRepo::new(txn),
        }
    }
}

impl Tx for PgTx<'_> {
    fn pull_requests(&self) -> &dyn PullRequestRepo { &self.pull_requests }

    fn teams(&self) -> &dyn TeamRepo { &self.teams }

    fn users(&self) -> &dyn UserRepo { &self.users }
}

impl TxManager for PgTxManager {
    fn with_tx<'m, T, F>(&'m self, f: F) -> TxFuture<'m, T>
    where
        T: Send + 'm,
        F: for<'t> FnOnce(&'t (dyn Tx + 't)) -> TxFuture<'t, T> + Send + 'm,
    {
        Box::pin(async move {
            let txn = self.db.begin().await.map_err(|err| {
                tracing::error!(error = %err, "failed to begin transaction");
                AppError::internal("internal server error")
            })?;

            let handle = PgTx::new(&txn);
            let result = f(&handle).await;
            drop(handle);

            match result {
                Ok(value) => {
                    txn.commit().await.map_err(|err| {
                        tracing::error!(error = %err, "transaction commit failed");
                        AppError::internal("internal server error")
                    })?;
                    Ok(value)
                },
                Err(err) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::warn!(error = %rollback_err, "transaction rollback failed");
                    }
                    Err(err)
                },
            }
        })
    }
}

//! # Database Migrations
//!
//! Sea-ORM migrations for the review assignment schema, plus the shared
//! database connector used by the CLI.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_teams_table;
mod m20260301_000002_create_users_table;
mod m20260301_000003_create_pull_requests_table;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Upper bound on pooled connections; transactions are short-lived, so a
/// small pool is enough to saturate the worker count.
const MAX_POOL_CONNECTIONS: u32 = 20;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_teams_table::Migration),
            Box::new(m20260301_000002_create_users_table::Migration),
            Box::new(m20260301_000003_create_pull_requests_table::Migration),
        ]
    }
}

/// Connect to the database with a bounded connection pool.
///
/// Every transaction acquires a connection at the start of an operation and
/// releases it on commit or rollback; nothing holds a connection across a
/// handler return.
pub async fn connect_to_database(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(MAX_POOL_CONNECTIONS)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    tracing::debug!(max_connections = MAX_POOL_CONNECTIONS, "connecting to database");
    Database::connect(options).await
}

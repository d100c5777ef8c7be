//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - [`SeaOrmStore`], the implementation of the core store ports
//! - Repositories running core services inside one transaction per mutation
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod store;

pub use repositories::{
    AccountRepository, CompanyRepository, JournalEntryRepository, ReferenceAccountRepository,
};
pub use store::SeaOrmStore;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use ecf_shared::config::DatabaseConfig;

/// Establishes a connection pool sized by `config`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    info!(
        max_connections = config.max_connections,
        "Database connection established"
    );

    Ok(db)
}

//! Database layer with `SeaORM` entities, repositories and batch jobs.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - The transactional aggregation, forecast and import jobs

pub mod entities;
pub mod jobs;
pub mod migration;
pub mod repositories;

pub use jobs::{FiscalJobs, ImportService, JobError};
pub use repositories::{DimensionRepository, ScenarioRepository};

use std::time::Duration;

use fiscora_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the configured database.
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

    Database::connect(options).await
}

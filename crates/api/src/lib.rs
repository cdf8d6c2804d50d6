//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Job trigger routes for the ledger aggregator and the forecast seeder
//! - CSV import and template routes
//! - Fiscal calendar lookups
//! - Error to response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use fiscora_core::fiscal::FiscalError;
use fiscora_db::{FiscalJobs, ImportService};
use fiscora_shared::FiscalConfig;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Aggregation and forecast jobs.
    pub jobs: Arc<FiscalJobs>,
    /// CSV imports.
    pub imports: Arc<ImportService>,
    /// Held while a job or import runs; at most one runs at a time.
    pub job_slot: Arc<Mutex<()>>,
}

impl AppState {
    /// Builds the state from a connection and the fiscal settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured fiscal start month is invalid.
    pub fn new(db: DatabaseConnection, fiscal: FiscalConfig) -> Result<Self, FiscalError> {
        let imports = ImportService::new(db.clone(), fiscal.actual_scenario.clone());
        let jobs = FiscalJobs::new(db.clone(), fiscal)?;
        Ok(Self {
            db: Arc::new(db),
            jobs: Arc::new(jobs),
            imports: Arc::new(imports),
            job_slot: Arc::new(Mutex::new(())),
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

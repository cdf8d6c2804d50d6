//! Transactional batch jobs.
//!
//! Each job resolves its scenario, then does all of its writes inside a
//! single database transaction. A missing scenario is reported through
//! [`JobOutcome::ScenarioMissing`] and writes nothing.
//!
//! [`JobOutcome::ScenarioMissing`]: fiscora_core::JobOutcome::ScenarioMissing

mod aggregation;
pub mod error;
mod forecast;
pub mod import;

pub use error::JobError;
pub use import::ImportService;

use fiscora_core::fiscal::{FiscalCalendar, FiscalError};
use fiscora_shared::FiscalConfig;
use sea_orm::DatabaseConnection;

/// Runs the ledger aggregator and the forecast seeder.
#[derive(Debug, Clone)]
pub struct FiscalJobs {
    db: DatabaseConnection,
    calendar: FiscalCalendar,
    config: FiscalConfig,
}

impl FiscalJobs {
    /// Creates the job runner for a fiscal configuration.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidStartMonth` if the configured start month
    /// is outside 1-12.
    pub fn new(db: DatabaseConnection, config: FiscalConfig) -> Result<Self, FiscalError> {
        let calendar = FiscalCalendar::try_from(&config)?;
        Ok(Self {
            db,
            calendar,
            config,
        })
    }

    /// The fiscal calendar the jobs label periods with.
    #[must_use]
    pub const fn calendar(&self) -> &FiscalCalendar {
        &self.calendar
    }

    /// The fiscal configuration.
    #[must_use]
    pub const fn config(&self) -> &FiscalConfig {
        &self.config
    }
}

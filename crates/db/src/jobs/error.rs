//! Batch job errors.

use fiscora_core::fiscal::FiscalError;
use fiscora_core::import::ImportError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::repositories::DimensionError;

/// Errors that abort a job. The job's transaction is rolled back.
#[derive(Debug, Error)]
pub enum JobError {
    /// Invalid fiscal year, month or calendar setting.
    #[error("Invalid fiscal input: {0}")]
    Fiscal(#[from] FiscalError),

    /// The uploaded file was rejected.
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Dimension lookup failed.
    #[error("{0}")]
    Dimension(#[from] DimensionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl JobError {
    /// Returns true if the caller supplied bad input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Fiscal(_) | Self::Import(_))
    }
}

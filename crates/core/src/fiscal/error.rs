//! Fiscal calendar error types.

use thiserror::Error;

/// Errors raised while building or querying the fiscal calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Fiscal year start month outside 1-12.
    #[error("Fiscal year start month must be between 1 and 12, got {0}")]
    InvalidStartMonth(u32),

    /// Calendar month outside 1-12.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year cannot be represented as a calendar date.
    #[error("Year {0} is outside the supported date range")]
    YearOutOfRange(i32),
}

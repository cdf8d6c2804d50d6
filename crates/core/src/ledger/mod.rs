//! Aggregation of raw ledger transactions into monthly actuals.

pub mod aggregate;
pub mod types;

pub use aggregate::LedgerAggregator;
pub use types::{LedgerLine, MonthlyTotal};

//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//!
//! Repositories that hold a connection serve standalone lookups. The ones
//! used inside batch jobs take any `ConnectionTrait` so the job can pass its
//! transaction.

pub mod account;
pub mod date_dimension;
pub mod dimension;
pub mod financial_record;
pub mod ledger;
pub mod scenario;

pub use account::{AccountRepository, ResolvedAccount};
pub use date_dimension::DateDimensionRepository;
pub use dimension::{DimensionError, DimensionRepository, FundType};
pub use financial_record::FinancialRecordRepository;
pub use ledger::LedgerRepository;
pub use scenario::ScenarioRepository;

use sea_orm::DbErr;

/// Rows per multi-row INSERT, kept under `SQLite`'s bound-parameter limit.
pub(crate) const BATCH_SIZE: usize = 500;

#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn month_column(month: u32) -> i32 {
    month as i32
}

pub(crate) fn month_value(month: i32) -> Result<u32, DbErr> {
    u32::try_from(month).map_err(|_| DbErr::Custom(format!("invalid month {month}")))
}

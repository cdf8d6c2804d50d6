//! Core business logic for Fiscora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fiscal` - Fiscal calendar: month enumeration and fiscal-year labelling
//! - `ledger` - Grouping of ledger lines into monthly ACTUAL records
//! - `forecast` - Seeding of editable FORECAST records from the last actual
//! - `record` - Financial record drafts and their uniqueness key
//! - `import` - CSV parsing for GL transactions, accounts and the date dimension
//! - `outcome` - Result type shared by the batch jobs

pub mod fiscal;
pub mod forecast;
pub mod import;
pub mod ledger;
pub mod outcome;
pub mod record;

pub use outcome::{AggregationSummary, ImportSummary, JobOutcome, SeedSummary};

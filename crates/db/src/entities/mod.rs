//! `SeaORM` entity definitions.

pub mod accounts;
pub mod date_dimensions;
pub mod departments;
pub mod financial_records;
pub mod funds;
pub mod gl_transactions;
pub mod locations;
pub mod regions;
pub mod scenarios;
pub mod sectors;
pub mod states;

//! Ledger data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::CalendarMonth;
use crate::record::Slice;

/// A dated ledger amount tagged with its slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Dimension slice.
    pub slice: Slice,
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction amount.
    pub amount: Decimal,
}

/// Sum of ledger amounts for one slice in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Dimension slice.
    pub slice: Slice,
    /// Calendar month the amounts were dated in.
    pub period: CalendarMonth,
    /// Summed amount.
    pub total: Decimal,
}

//! Financial records produced by the batch jobs.

use std::fmt;

use fiscora_shared::types::{AccountId, FundId, SectorId, StateId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budgeting dimension combination used as the grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slice {
    /// GL account.
    pub account: AccountId,
    /// Fund.
    pub fund: FundId,
    /// State.
    pub state: StateId,
    /// Sector.
    pub sector: SectorId,
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account={} fund={} state={} sector={}",
            self.account, self.fund, self.state, self.sector
        )
    }
}

/// Identity of a financial record within one scenario.
///
/// Together with the scenario this is the uniqueness key of the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    /// Dimension slice.
    pub slice: Slice,
    /// Fiscal year label.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

/// A financial record ready to be upserted under some scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Slice, fiscal year and month.
    pub key: RecordKey,
    /// Monthly value.
    pub value: Decimal,
    /// Whether end users may edit the value (forecasts only).
    pub is_editable: bool,
}

impl RecordDraft {
    /// An aggregated actual; actuals are never editable.
    #[must_use]
    pub const fn actual(key: RecordKey, value: Decimal) -> Self {
        Self {
            key,
            value,
            is_editable: false,
        }
    }

    /// A seeded forecast; forecasts are always editable.
    #[must_use]
    pub const fn forecast(key: RecordKey, value: Decimal) -> Self {
        Self {
            key,
            value,
            is_editable: true,
        }
    }
}

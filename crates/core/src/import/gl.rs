//! General ledger transaction import.

use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use fiscora_shared::types::{AccountId, DepartmentId, FundId, SectorId, StateId};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::{ImportError, RowError};
use super::{non_empty, read_rows};
use crate::record::Slice;

/// Description used when a row leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "Imported GL Entry";

/// Columns a GL file must carry. `Description` is optional.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "Account Code",
    "Fund Name",
    "Department",
    "State",
    "Sector",
    "Amount",
];

/// Natural-key lookup of the dimensions a GL row refers to.
#[derive(Debug, Clone, Default)]
pub struct DimensionIndex {
    /// Accounts by code.
    pub accounts: HashMap<String, AccountId>,
    /// Funds by name.
    pub funds: HashMap<String, FundId>,
    /// Departments by name.
    pub departments: HashMap<String, DepartmentId>,
    /// States by name.
    pub states: HashMap<String, StateId>,
    /// Sectors by name.
    pub sectors: HashMap<String, SectorId>,
}

/// A validated GL transaction ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGlTransaction {
    /// Account, fund, state and sector.
    pub slice: Slice,
    /// Owning department.
    pub department: DepartmentId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Free text.
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct GlRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Account Code")]
    account_code: String,
    #[serde(rename = "Fund Name")]
    fund_name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Sector")]
    sector: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

/// Parses a GL transaction file against the known dimensions.
///
/// # Errors
///
/// Rejects the whole file if the header is incomplete or any row has a bad
/// date, a bad amount or an unknown dimension.
pub fn parse_gl_transactions<R: Read>(
    reader: R,
    index: &DimensionIndex,
) -> Result<Vec<NewGlTransaction>, ImportError> {
    let mut transactions = Vec::new();
    let mut errors = Vec::new();

    for (row, parsed) in read_rows::<_, GlRow>(reader, REQUIRED_COLUMNS)? {
        match parsed
            .map_err(|e| e.to_string())
            .and_then(|raw| resolve(raw, index))
        {
            Ok(transaction) => transactions.push(transaction),
            Err(message) => errors.push(RowError::new(row, message)),
        }
    }

    if errors.is_empty() {
        Ok(transactions)
    } else {
        Err(ImportError::InvalidRows(errors))
    }
}

fn resolve(raw: GlRow, index: &DimensionIndex) -> Result<NewGlTransaction, String> {
    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", raw.date))?;
    let amount = Decimal::from_str(&raw.amount)
        .map_err(|_| format!("Invalid amount '{}'", raw.amount))?;

    let account = index.accounts.get(&raw.account_code);
    let fund = index.funds.get(&raw.fund_name);
    let department = index.departments.get(&raw.department);
    let state = index.states.get(&raw.state);
    let sector = index.sectors.get(&raw.sector);

    let (Some(account), Some(fund), Some(department), Some(state), Some(sector)) =
        (account, fund, department, state, sector)
    else {
        let mut missing = Vec::new();
        if account.is_none() {
            missing.push(format!("Account Code '{}'", raw.account_code));
        }
        if fund.is_none() {
            missing.push(format!("Fund Name '{}'", raw.fund_name));
        }
        if department.is_none() {
            missing.push(format!("Department '{}'", raw.department));
        }
        if state.is_none() {
            missing.push(format!("State '{}'", raw.state));
        }
        if sector.is_none() {
            missing.push(format!("Sector '{}'", raw.sector));
        }
        return Err(format!("Missing dimension lookup: {}", missing.join(", ")));
    };

    Ok(NewGlTransaction {
        slice: Slice {
            account: *account,
            fund: *fund,
            state: *state,
            sector: *sector,
        },
        department: *department,
        date,
        amount,
        description: non_empty(raw.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
    })
}

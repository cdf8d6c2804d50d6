//! Chart of accounts import.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ImportError, RowError};
use super::{non_empty, read_rows};

/// Columns an accounts file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "AccountCode",
    "AccountName",
    "AccountType",
    "StatementCategory",
    "IsLeaf",
    "DisplayOrder",
    "ActiveFlag",
];

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Balance sheet asset.
    Asset,
    /// Balance sheet liability.
    Liability,
    /// Owner's equity.
    Equity,
    /// Income.
    Revenue,
    /// Spending.
    Expense,
}

impl AccountType {
    /// Stored form of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "EQUITY" => Ok(Self::Equity),
            "REVENUE" => Ok(Self::Revenue),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(format!("Invalid account type '{other}'")),
        }
    }
}

/// A validated account row. Parent codes are resolved when written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Financial statement grouping.
    pub statement_category: String,
    /// Reporting hierarchy, levels 1 to 4.
    pub hierarchy: [Option<String>; 4],
    /// Code of the parent account, if any.
    pub parent_code: Option<String>,
    /// Whether transactions may post here.
    pub is_leaf: bool,
    /// Sort key in reports.
    pub display_order: i32,
    /// Active flag.
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AccountRow {
    account_code: String,
    account_name: String,
    account_type: String,
    statement_category: String,
    #[serde(rename = "HierarchyLevel1", default)]
    hierarchy_level1: Option<String>,
    #[serde(rename = "HierarchyLevel2", default)]
    hierarchy_level2: Option<String>,
    #[serde(rename = "HierarchyLevel3", default)]
    hierarchy_level3: Option<String>,
    #[serde(rename = "HierarchyLevel4", default)]
    hierarchy_level4: Option<String>,
    #[serde(default)]
    parent_account_code: Option<String>,
    is_leaf: String,
    display_order: String,
    active_flag: String,
}

/// Reads a yes/no column. `TRUE`, `1` and `YES` (any case) are true.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_uppercase().as_str(), "TRUE" | "1" | "YES")
}

/// Parses a chart of accounts file.
///
/// # Errors
///
/// Rejects the whole file if the header is incomplete or any row has an
/// empty code, an unknown account type or a non-numeric display order.
pub fn parse_accounts<R: Read>(reader: R) -> Result<Vec<AccountRecord>, ImportError> {
    let mut accounts = Vec::new();
    let mut errors = Vec::new();

    for (row, parsed) in read_rows::<_, AccountRow>(reader, REQUIRED_COLUMNS)? {
        match parsed.map_err(|e| e.to_string()).and_then(validate) {
            Ok(account) => accounts.push(account),
            Err(message) => errors.push(RowError::new(row, message)),
        }
    }

    if errors.is_empty() {
        Ok(accounts)
    } else {
        Err(ImportError::InvalidRows(errors))
    }
}

fn validate(raw: AccountRow) -> Result<AccountRecord, String> {
    if raw.account_code.is_empty() {
        return Err("AccountCode is empty".to_string());
    }
    let account_type = raw.account_type.parse::<AccountType>()?;
    let display_order = raw
        .display_order
        .parse::<i32>()
        .map_err(|_| format!("Invalid DisplayOrder '{}'", raw.display_order))?;

    Ok(AccountRecord {
        code: raw.account_code,
        name: raw.account_name,
        account_type,
        statement_category: raw.statement_category,
        hierarchy: [
            non_empty(raw.hierarchy_level1),
            non_empty(raw.hierarchy_level2),
            non_empty(raw.hierarchy_level3),
            non_empty(raw.hierarchy_level4),
        ],
        parent_code: non_empty(raw.parent_account_code),
        is_leaf: parse_flag(&raw.is_leaf),
        display_order,
        is_active: parse_flag(&raw.active_flag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "AccountCode,AccountName,AccountType,StatementCategory,\
HierarchyLevel1,HierarchyLevel2,HierarchyLevel3,HierarchyLevel4,\
ParentAccountCode,IsLeaf,DisplayOrder,ActiveFlag\n";

    #[rstest]
    #[case("TRUE", true)]
    #[case("true", true)]
    #[case("1", true)]
    #[case("Yes", true)]
    #[case("FALSE", false)]
    #[case("0", false)]
    #[case("", false)]
    #[case("Y", false)]
    fn test_parse_flag(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(input), expected);
    }

    #[test]
    fn test_account_type_round_trip() {
        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert_eq!(t.as_str().parse::<AccountType>(), Ok(t));
        }
        assert_eq!("revenue".parse::<AccountType>(), Ok(AccountType::Revenue));
        assert!("INCOME".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_parses_parent_and_child() {
        let csv = format!(
            "{HEADER}4000,Revenue,REVENUE,Income Statement,Income,,,,,FALSE,1,TRUE\n\
             4100,Sales,revenue,Income Statement,Income,Sales,,,4000,YES,2,1\n"
        );

        let accounts = parse_accounts(csv.as_bytes()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].parent_code, None);
        assert!(!accounts[0].is_leaf);
        assert_eq!(accounts[0].hierarchy[1], None);
        assert_eq!(accounts[1].parent_code.as_deref(), Some("4000"));
        assert_eq!(accounts[1].hierarchy[1].as_deref(), Some("Sales"));
        assert_eq!(accounts[1].account_type, AccountType::Revenue);
        assert!(accounts[1].is_leaf);
        assert!(accounts[1].is_active);
        assert_eq!(accounts[1].display_order, 2);
    }

    #[test]
    fn test_invalid_rows_are_reported() {
        let csv = format!(
            "{HEADER}4000,Revenue,INCOME,Income Statement,,,,,,TRUE,1,TRUE\n\
             4100,Sales,REVENUE,Income Statement,,,,,,TRUE,first,TRUE\n"
        );

        let err = parse_accounts(csv.as_bytes()).unwrap_err();

        let ImportError::InvalidRows(errors) = err else {
            panic!("expected row errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].row, 1);
        assert!(errors[0].message.contains("INCOME"));
        assert!(errors[1].message.contains("DisplayOrder"));
    }

    #[test]
    fn test_hierarchy_columns_are_optional() {
        let csv = "AccountCode,AccountName,AccountType,StatementCategory,IsLeaf,DisplayOrder,ActiveFlag\n\
                   1000,Cash,ASSET,Balance Sheet,TRUE,1,TRUE\n";

        let accounts = parse_accounts(csv.as_bytes()).unwrap();

        assert_eq!(accounts[0].hierarchy, [None, None, None, None]);
        assert_eq!(accounts[0].parent_code, None);
    }
}

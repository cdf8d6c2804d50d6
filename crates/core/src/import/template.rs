//! Blank CSV templates for each import kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The bulk imports the system accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// General ledger transactions.
    GlTransactions,
    /// Chart of accounts.
    Accounts,
    /// Date dimension.
    DateDimensions,
}

impl ImportKind {
    /// Full header row, in template order.
    #[must_use]
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::GlTransactions => &[
                "Date",
                "Account Code",
                "Fund Name",
                "Department",
                "State",
                "Sector",
                "Amount",
                "Description",
            ],
            Self::Accounts => &[
                "AccountCode",
                "AccountName",
                "AccountType",
                "StatementCategory",
                "HierarchyLevel1",
                "HierarchyLevel2",
                "HierarchyLevel3",
                "HierarchyLevel4",
                "ParentAccountCode",
                "IsLeaf",
                "DisplayOrder",
                "ActiveFlag",
            ],
            Self::DateDimensions => super::date_dimension::REQUIRED_COLUMNS,
        }
    }

    /// Suggested download name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::GlTransactions => "gl_transactions_template.csv",
            Self::Accounts => "accounts_template.csv",
            Self::DateDimensions => "date_dimensions_template.csv",
        }
    }

    /// A CSV file holding only the header row.
    #[must_use]
    pub fn template_csv(self) -> String {
        let mut csv = self.headers().join(",");
        csv.push('\n');
        csv
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GlTransactions => "gl-transactions",
            Self::Accounts => "accounts",
            Self::DateDimensions => "date-dimensions",
        })
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gl-transactions" | "gl" => Ok(Self::GlTransactions),
            "accounts" => Ok(Self::Accounts),
            "date-dimensions" | "dates" => Ok(Self::DateDimensions),
            other => Err(format!("Unknown import kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{DimensionIndex, parse_accounts, parse_date_dimensions, parse_gl_transactions};

    #[test]
    fn test_templates_parse_as_empty_imports() {
        let gl = ImportKind::GlTransactions.template_csv();
        let accounts = ImportKind::Accounts.template_csv();
        let dates = ImportKind::DateDimensions.template_csv();

        assert!(
            parse_gl_transactions(gl.as_bytes(), &DimensionIndex::default())
                .unwrap()
                .is_empty()
        );
        assert!(parse_accounts(accounts.as_bytes()).unwrap().is_empty());
        assert!(parse_date_dimensions(dates.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            ImportKind::GlTransactions,
            ImportKind::Accounts,
            ImportKind::DateDimensions,
        ] {
            assert_eq!(kind.to_string().parse::<ImportKind>(), Ok(kind));
        }
        assert_eq!("gl".parse::<ImportKind>(), Ok(ImportKind::GlTransactions));
        assert!("budgets".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_gl_template_header() {
        assert_eq!(
            ImportKind::GlTransactions.template_csv(),
            "Date,Account Code,Fund Name,Department,State,Sector,Amount,Description\n"
        );
    }
}

//! Comparison rule used when looking up the last actual before a cutoff.

use serde::{Deserialize, Serialize};

/// How the forecast seeder decides whether an actual record lies at or
/// before the cutoff `(month, year)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffRule {
    /// The record's period, converted to a calendar month, must not be later
    /// than the cutoff month.
    #[default]
    Chronological,
    /// `year <= cutoff_year AND month <= cutoff_month`, each field compared on
    /// its own. Matches the behaviour of the first release of the seeder.
    FieldWise,
}

impl std::fmt::Display for CutoffRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chronological => write!(f, "chronological"),
            Self::FieldWise => write!(f, "field_wise"),
        }
    }
}

impl std::str::FromStr for CutoffRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chronological" => Ok(Self::Chronological),
            "field_wise" | "fieldwise" => Ok(Self::FieldWise),
            _ => Err(format!("Unknown cutoff rule: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_cutoff_rule_from_str() {
        assert_eq!(
            CutoffRule::from_str("chronological").unwrap(),
            CutoffRule::Chronological
        );
        assert_eq!(
            CutoffRule::from_str("FIELD_WISE").unwrap(),
            CutoffRule::FieldWise
        );
        assert!(CutoffRule::from_str("sometimes").is_err());
    }

    #[test]
    fn test_cutoff_rule_serde() {
        let json = serde_json::to_string(&CutoffRule::FieldWise).unwrap();
        assert_eq!(json, "\"field_wise\"");
        let parsed: CutoffRule = serde_json::from_str("\"chronological\"").unwrap();
        assert_eq!(parsed, CutoffRule::Chronological);
    }
}

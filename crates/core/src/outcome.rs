//! Outcome of a batch job run.

use serde::Serialize;

use crate::import::ImportKind;

/// Counts reported by the ledger aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationSummary {
    /// Records inserted by this run.
    pub created: u64,
    /// Existing records overwritten by this run.
    pub updated: u64,
}

impl AggregationSummary {
    /// Total records written.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.created + self.updated
    }
}

/// Counts reported by the forecast seeder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Fiscal months after the cutoff.
    pub forecast_months: u64,
    /// Distinct slices with actual data in the fiscal year.
    pub slices: u64,
}

impl SeedSummary {
    /// Approximate number of records written (`forecast_months × slices`).
    ///
    /// Upserts may overwrite rather than create, so this is not a count of
    /// new rows.
    #[must_use]
    pub const fn approximate_records(&self) -> u64 {
        self.forecast_months * self.slices
    }
}

/// Rows written by a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Which import ran.
    pub kind: ImportKind,
    /// Rows inserted or upserted.
    pub rows: u64,
}

/// Result of a batch job.
///
/// A missing scenario is a configuration precondition, not a failure: the job
/// does nothing and the caller inspects the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome<T> {
    /// The job ran to completion.
    Completed(T),
    /// The named scenario does not exist; nothing was written.
    ScenarioMissing {
        /// Scenario name that was looked up.
        name: String,
    },
}

impl<T> JobOutcome<T> {
    /// Returns the summary if the job completed.
    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(summary) => Some(summary),
            Self::ScenarioMissing { .. } => None,
        }
    }

    /// Returns true if the job was skipped for a missing scenario.
    pub const fn is_scenario_missing(&self) -> bool {
        matches!(self, Self::ScenarioMissing { .. })
    }
}

impl JobOutcome<AggregationSummary> {
    /// Records created plus updated, zero when skipped.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.completed().map_or(0, AggregationSummary::total)
    }
}

impl JobOutcome<SeedSummary> {
    /// Approximate records written, zero when skipped.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.completed().map_or(0, SeedSummary::approximate_records)
    }
}

impl JobOutcome<ImportSummary> {
    /// Rows imported, zero when skipped.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.completed().map_or(0, |summary| summary.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_count() {
        let outcome = JobOutcome::Completed(AggregationSummary {
            created: 3,
            updated: 2,
        });
        assert_eq!(outcome.count(), 5);
        assert!(!outcome.is_scenario_missing());
    }

    #[test]
    fn test_missing_scenario_counts_zero() {
        let outcome: JobOutcome<SeedSummary> = JobOutcome::ScenarioMissing {
            name: "FORECAST".to_string(),
        };
        assert_eq!(outcome.count(), 0);
        assert!(outcome.is_scenario_missing());
        assert!(outcome.completed().is_none());
    }

    #[test]
    fn test_seed_count_is_months_times_slices() {
        let outcome = JobOutcome::Completed(SeedSummary {
            forecast_months: 10,
            slices: 4,
        });
        assert_eq!(outcome.count(), 40);
    }
}

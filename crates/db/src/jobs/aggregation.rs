//! Ledger aggregation job.

use chrono::NaiveDate;
use fiscora_core::ledger::LedgerAggregator;
use fiscora_core::outcome::{AggregationSummary, JobOutcome};
use sea_orm::TransactionTrait;
use tracing::{info, warn};

use super::{FiscalJobs, JobError};
use crate::repositories::{FinancialRecordRepository, LedgerRepository, ScenarioRepository};

impl FiscalJobs {
    /// Aggregates ACTUAL ledger transactions dated from the start of
    /// `fiscal_year` through `cutoff_date` into monthly ACTUAL records.
    ///
    /// `cutoff_date` defaults to today (UTC). Each monthly total is labelled
    /// with the fiscal year its calendar month belongs to, so a cutoff past
    /// the end of `fiscal_year` writes records for the next fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year is out of range or a database
    /// operation fails. Nothing is written in either case.
    pub async fn aggregate_historical_data(
        &self,
        fiscal_year: i32,
        cutoff_date: Option<NaiveDate>,
    ) -> Result<JobOutcome<AggregationSummary>, JobError> {
        let cutoff = cutoff_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let start = self.calendar.start_date(fiscal_year)?;
        let scenario_name = &self.config.actual_scenario;

        let Some(scenario) = ScenarioRepository::new(self.db.clone())
            .find_by_name(scenario_name)
            .await?
        else {
            warn!(scenario = %scenario_name, "Scenario not defined, skipping aggregation");
            return Ok(JobOutcome::ScenarioMissing {
                name: scenario_name.clone(),
            });
        };

        info!(fiscal_year, %start, %cutoff, "Aggregating ledger into monthly actuals");

        let txn = self.db.begin().await?;
        let lines = LedgerRepository::lines_between(&txn, scenario.id, start, cutoff).await?;
        let line_count = lines.len();
        let drafts = LedgerAggregator::aggregate(&self.calendar, fiscal_year, cutoff, lines)?;
        let summary = FinancialRecordRepository::upsert(&txn, scenario.id, &drafts).await?;
        txn.commit().await?;

        info!(
            fiscal_year,
            lines = line_count,
            created = summary.created,
            updated = summary.updated,
            "Aggregation complete"
        );
        Ok(JobOutcome::Completed(summary))
    }
}

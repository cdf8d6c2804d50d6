//! Forecast seeding job.

use fiscora_core::fiscal::CalendarMonth;
use fiscora_core::forecast::ForecastSeeder;
use fiscora_core::outcome::{JobOutcome, SeedSummary};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use tracing::{debug, info, warn};

use super::{FiscalJobs, JobError};
use crate::repositories::{FinancialRecordRepository, ScenarioRepository};

impl FiscalJobs {
    /// Seeds editable forecast records for every month of `fiscal_year`
    /// after the cutoff month.
    ///
    /// Every slice with ACTUAL records labelled `fiscal_year` gets one record
    /// per forecast month, valued at its latest actual at or before the
    /// cutoff, or zero when it has none. `forecast_scenario` defaults to the
    /// configured forecast scenario. Existing forecasts for the same keys are
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the cutoff month is outside 1-12 or a database
    /// operation fails. Nothing is written in either case.
    pub async fn initialize_forecast_data(
        &self,
        fiscal_year: i32,
        cutoff_month: u32,
        cutoff_year: i32,
        forecast_scenario: Option<&str>,
    ) -> Result<JobOutcome<SeedSummary>, JobError> {
        let cutoff = CalendarMonth::new(cutoff_month, cutoff_year)?;
        let scenario_name = forecast_scenario.unwrap_or(&self.config.forecast_scenario);
        let scenarios = ScenarioRepository::new(self.db.clone());

        let Some(forecast) = scenarios.find_by_name(scenario_name).await? else {
            warn!(scenario = %scenario_name, "Scenario not defined, skipping forecast seeding");
            return Ok(JobOutcome::ScenarioMissing {
                name: scenario_name.to_string(),
            });
        };
        let actual = scenarios
            .find_by_name(&self.config.actual_scenario)
            .await?;

        let months = ForecastSeeder::forecast_months(&self.calendar, fiscal_year, cutoff);
        info!(
            fiscal_year,
            %cutoff,
            forecast_months = months.len(),
            "Seeding forecast from last actuals"
        );

        let txn = self.db.begin().await?;

        let mut seeds = Vec::new();
        if let Some(actual) = actual {
            let slices =
                FinancialRecordRepository::slices_in_year(&txn, actual.id, fiscal_year).await?;
            let mut history =
                FinancialRecordRepository::points_until(&txn, actual.id, cutoff.year).await?;

            for slice in slices {
                let points = history.remove(&slice).unwrap_or_default();
                let seed = ForecastSeeder::latest_actual(
                    &self.calendar,
                    &points,
                    cutoff,
                    self.config.cutoff_rule,
                );
                if seed.is_none() {
                    debug!(%slice, "No actual at or before cutoff, seeding zero");
                }
                seeds.push((slice, seed.unwrap_or(Decimal::ZERO)));
            }
        } else {
            warn!(
                scenario = %self.config.actual_scenario,
                "Actual scenario not defined, no slices to seed"
            );
        }

        let drafts = ForecastSeeder::seed_records(fiscal_year, &months, &seeds);
        FinancialRecordRepository::upsert(&txn, forecast.id, &drafts).await?;
        txn.commit().await?;

        let summary = SeedSummary {
            forecast_months: months.len() as u64,
            slices: seeds.len() as u64,
        };
        info!(
            fiscal_year,
            forecast_months = summary.forecast_months,
            slices = summary.slices,
            "Forecast seeding complete"
        );
        Ok(JobOutcome::Completed(summary))
    }
}

//! Runs the batch jobs from the command line.
//!
//! Usage:
//!   jobs aggregate <FISCAL_YEAR> [--cutoff YYYY-MM-DD]
//!   jobs forecast <FISCAL_YEAR> <CUTOFF_MONTH> <CUTOFF_YEAR> [--scenario NAME]
//!
//! A missing scenario is reported and exits successfully; nothing is written.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fiscora_core::JobOutcome;
use fiscora_db::FiscalJobs;
use fiscora_shared::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobs")]
#[command(about = "Fiscora batch jobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Roll ledger activity up into monthly ACTUAL records
    Aggregate {
        /// First fiscal year to aggregate
        fiscal_year: i32,

        /// Last ledger date included (defaults to today)
        #[arg(long)]
        cutoff: Option<NaiveDate>,
    },

    /// Seed FORECAST records after the actual cutoff
    Forecast {
        /// Fiscal year to seed
        fiscal_year: i32,

        /// Calendar month of the last actual (1-12)
        cutoff_month: u32,

        /// Calendar year of the last actual
        cutoff_year: i32,

        /// Target scenario (defaults to the configured forecast scenario)
        #[arg(long)]
        scenario: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiscora_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let db = fiscora_db::connect(&config.database).await?;
    let jobs = FiscalJobs::new(db, config.fiscal)?;

    match cli.command {
        Command::Aggregate {
            fiscal_year,
            cutoff,
        } => match jobs.aggregate_historical_data(fiscal_year, cutoff).await? {
            JobOutcome::Completed(summary) => println!(
                "Aggregated {} records ({} created, {} updated)",
                summary.total(),
                summary.created,
                summary.updated
            ),
            JobOutcome::ScenarioMissing { name } => {
                println!("Scenario '{name}' is not defined, nothing aggregated");
            }
        },
        Command::Forecast {
            fiscal_year,
            cutoff_month,
            cutoff_year,
            scenario,
        } => match jobs
            .initialize_forecast_data(fiscal_year, cutoff_month, cutoff_year, scenario.as_deref())
            .await?
        {
            JobOutcome::Completed(summary) => println!(
                "Seeded {} forecast months for {} slices (~{} records)",
                summary.forecast_months,
                summary.slices,
                summary.approximate_records()
            ),
            JobOutcome::ScenarioMissing { name } => {
                println!("Scenario '{name}' is not defined, nothing seeded");
            }
        },
    }

    Ok(())
}

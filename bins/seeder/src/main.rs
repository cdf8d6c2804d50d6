//! Database seeder for Fiscora development and testing.
//!
//! Seeds the ACTUAL and FORECAST scenarios, one value per dimension, a small
//! chart of accounts and the date dimension for the current fiscal year.
//! Every step is idempotent.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use fiscora_core::fiscal::FiscalCalendar;
use fiscora_core::import::{DateDimensionRecord, ImportKind};
use fiscora_db::repositories::{DateDimensionRepository, FundType};
use fiscora_db::{DimensionRepository, ImportService, ScenarioRepository};
use fiscora_shared::{AppConfig, FiscalConfig};

/// Sample chart: a revenue and an expense branch.
const SAMPLE_ACCOUNTS: &str = "\
4000,Revenue,REVENUE,Income Statement,Income,,,,,FALSE,10,TRUE
4100,Contributions,REVENUE,Income Statement,Income,Contributions,,,4000,TRUE,11,TRUE
5000,Expenses,EXPENSE,Income Statement,Expenses,,,,,FALSE,20,TRUE
5100,Salaries,EXPENSE,Income Statement,Expenses,Personnel,,,5000,TRUE,21,TRUE
5200,Office Supplies,EXPENSE,Income Statement,Expenses,Operations,,,5000,TRUE,22,TRUE
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = fiscora_db::connect(&config.database).await?;

    println!("Seeding scenarios...");
    seed_scenarios(&ScenarioRepository::new(db.clone()), &config.fiscal).await?;

    println!("Seeding dimensions...");
    seed_dimensions(&DimensionRepository::new(db.clone())).await?;

    println!("Seeding chart of accounts...");
    let csv = format!("{}{SAMPLE_ACCOUNTS}", ImportKind::Accounts.template_csv());
    let summary = ImportService::new(db.clone(), config.fiscal.actual_scenario.clone())
        .import_accounts(csv.as_bytes())
        .await?;
    println!("  {} accounts upserted", summary.rows);

    println!("Seeding date dimension...");
    let calendar = FiscalCalendar::try_from(&config.fiscal)?;
    let fiscal_year = calendar.current_fiscal_year(Utc::now().date_naive());
    let days = DateDimensionRecord::span(
        calendar.start_date(fiscal_year)?,
        calendar.end_date(fiscal_year)?,
    );
    let rows = DateDimensionRepository::upsert_many(&db, &days).await?;
    println!("  {rows} days upserted for fiscal year {fiscal_year}");

    println!("Seeding complete!");
    Ok(())
}

async fn seed_scenarios(repo: &ScenarioRepository, fiscal: &FiscalConfig) -> anyhow::Result<()> {
    repo.ensure(&fiscal.actual_scenario, Some("Posted ledger activity"))
        .await?;
    repo.ensure(&fiscal.forecast_scenario, Some("Editable forecast"))
        .await?;
    for scenario in repo.list().await? {
        println!("  {}", scenario.name);
    }
    Ok(())
}

async fn seed_dimensions(repo: &DimensionRepository) -> anyhow::Result<()> {
    let region = repo.ensure_region("South West").await?;
    let state = repo.ensure_state("Lagos", region.id).await?;
    repo.ensure_fund("General Fund", FundType::Mutual).await?;
    repo.ensure_fund("Retirement Savings", FundType::Rsa).await?;
    repo.ensure_department("Finance").await?;
    repo.ensure_department("Operations").await?;
    repo.ensure_sector("Public").await?;
    println!("  region {} / state {}", region.name, state.name);
    Ok(())
}

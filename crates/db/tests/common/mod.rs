//! Shared setup for database integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use fiscora_core::import::NewGlTransaction;
use fiscora_core::record::Slice;
use fiscora_db::migration::{Migrator, MigratorTrait};
use fiscora_db::repositories::{DimensionRepository, FundType, LedgerRepository};
use fiscora_db::{FiscalJobs, ScenarioRepository, entities::accounts};
use fiscora_shared::FiscalConfig;
use fiscora_shared::types::{AccountId, DepartmentId, FundId, SectorId, StateId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

/// Fresh in-memory database with all migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Job runner with the default October calendar.
pub fn jobs(db: &DatabaseConnection) -> FiscalJobs {
    FiscalJobs::new(db.clone(), FiscalConfig::default()).expect("valid fiscal config")
}

/// Creates the ACTUAL and FORECAST scenarios, returning their ids.
pub async fn create_scenarios(db: &DatabaseConnection) -> (Uuid, Uuid) {
    let repo = ScenarioRepository::new(db.clone());
    let actual = repo.ensure("ACTUAL", None).await.expect("create ACTUAL");
    let forecast = repo.ensure("FORECAST", None).await.expect("create FORECAST");
    (actual.id, forecast.id)
}

/// Dimension rows backing test slices.
pub struct Fixture {
    pub department: DepartmentId,
    pub fund: FundId,
    pub state: StateId,
    pub sector: SectorId,
}

impl Fixture {
    /// Creates one fund, department, state and sector.
    pub async fn create(db: &DatabaseConnection) -> Self {
        let repo = DimensionRepository::new(db.clone());
        let region = repo.ensure_region("South West").await.expect("region");
        let state = repo.ensure_state("Lagos", region.id).await.expect("state");
        let fund = repo
            .ensure_fund("Main Fund", FundType::Mutual)
            .await
            .expect("fund");
        let department = repo.ensure_department("Finance").await.expect("department");
        let sector = repo.ensure_sector("Retail").await.expect("sector");

        Self {
            department: DepartmentId::from_uuid(department.id),
            fund: FundId::from_uuid(fund.id),
            state: StateId::from_uuid(state.id),
            sector: SectorId::from_uuid(sector.id),
        }
    }

    /// Creates an account and returns the slice for it.
    pub async fn slice(&self, db: &DatabaseConnection, code: &str) -> Slice {
        let now = chrono::Utc::now();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.to_string()),
            name: Set(format!("Account {code}")),
            account_type: Set("REVENUE".to_string()),
            statement_category: Set("Income Statement".to_string()),
            hierarchy_level1: Set(None),
            hierarchy_level2: Set(None),
            hierarchy_level3: Set(None),
            hierarchy_level4: Set(None),
            parent_id: Set(None),
            is_leaf: Set(true),
            display_order: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("account");

        Slice {
            account: AccountId::from_uuid(account.id),
            fund: self.fund,
            state: self.state,
            sector: self.sector,
        }
    }

    /// Writes ledger lines for a slice under a scenario.
    pub async fn post(
        &self,
        db: &DatabaseConnection,
        scenario_id: Uuid,
        slice: Slice,
        entries: &[(NaiveDate, Decimal)],
    ) {
        let transactions: Vec<NewGlTransaction> = entries
            .iter()
            .map(|(date, amount)| NewGlTransaction {
                slice,
                department: self.department,
                date: *date,
                amount: *amount,
                description: "test entry".to_string(),
            })
            .collect();
        LedgerRepository::insert_transactions(db, scenario_id, &transactions)
            .await
            .expect("insert ledger lines");
    }
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

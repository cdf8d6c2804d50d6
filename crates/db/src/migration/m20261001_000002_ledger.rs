//! Ledger tables: GL transactions and monthly financial records.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

use super::m20261001_000001_dimensions::{Accounts, Departments, Funds, Scenarios, Sectors, States};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(GlTransactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GlTransactions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GlTransactions::Date).date().not_null())
                    .col(ColumnDef::new(GlTransactions::AccountId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::FundId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::StateId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::SectorId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::ScenarioId).uuid().not_null())
                    .col(ColumnDef::new(GlTransactions::Description).text().not_null())
                    .col(money(backend, GlTransactions::Amount))
                    .col(money(backend, GlTransactions::Balance).default(0))
                    .col(
                        ColumnDef::new(GlTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_account")
                            .from(GlTransactions::Table, GlTransactions::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_fund")
                            .from(GlTransactions::Table, GlTransactions::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_department")
                            .from(GlTransactions::Table, GlTransactions::DepartmentId)
                            .to(Departments::Table, Departments::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_state")
                            .from(GlTransactions::Table, GlTransactions::StateId)
                            .to(States::Table, States::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_sector")
                            .from(GlTransactions::Table, GlTransactions::SectorId)
                            .to(Sectors::Table, Sectors::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gl_transactions_scenario")
                            .from(GlTransactions::Table, GlTransactions::ScenarioId)
                            .to(Scenarios::Table, Scenarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Aggregation scans by scenario and date range
        manager
            .create_index(
                Index::create()
                    .name("idx_gl_transactions_scenario_date")
                    .table(GlTransactions::Table)
                    .col(GlTransactions::ScenarioId)
                    .col(GlTransactions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinancialRecords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FinancialRecords::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FinancialRecords::AccountId).uuid().not_null())
                    .col(ColumnDef::new(FinancialRecords::FundId).uuid().not_null())
                    .col(ColumnDef::new(FinancialRecords::StateId).uuid().not_null())
                    .col(ColumnDef::new(FinancialRecords::SectorId).uuid().not_null())
                    .col(ColumnDef::new(FinancialRecords::ScenarioId).uuid().not_null())
                    .col(ColumnDef::new(FinancialRecords::Year).integer().not_null())
                    .col(ColumnDef::new(FinancialRecords::Month).integer().not_null())
                    .col(money(backend, FinancialRecords::Value).default(0))
                    .col(
                        ColumnDef::new(FinancialRecords::IsEditable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FinancialRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_records_account")
                            .from(FinancialRecords::Table, FinancialRecords::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_records_fund")
                            .from(FinancialRecords::Table, FinancialRecords::FundId)
                            .to(Funds::Table, Funds::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_records_state")
                            .from(FinancialRecords::Table, FinancialRecords::StateId)
                            .to(States::Table, States::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_records_sector")
                            .from(FinancialRecords::Table, FinancialRecords::SectorId)
                            .to(Sectors::Table, Sectors::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_records_scenario")
                            .from(FinancialRecords::Table, FinancialRecords::ScenarioId)
                            .to(Scenarios::Table, Scenarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per slice, period and scenario; target of the upsert
        manager
            .create_index(
                Index::create()
                    .name("uq_financial_records_slice_period")
                    .table(FinancialRecords::Table)
                    .col(FinancialRecords::AccountId)
                    .col(FinancialRecords::FundId)
                    .col(FinancialRecords::StateId)
                    .col(FinancialRecords::SectorId)
                    .col(FinancialRecords::Year)
                    .col(FinancialRecords::Month)
                    .col(FinancialRecords::ScenarioId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_financial_records_scenario_year")
                    .table(FinancialRecords::Table)
                    .col(FinancialRecords::ScenarioId)
                    .col(FinancialRecords::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialRecords::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GlTransactions::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

/// Money column: NUMERIC(18, 2), or REAL on `SQLite` which has no exact
/// decimal type.
fn money<T: IntoIden>(backend: DatabaseBackend, column: T) -> ColumnDef {
    let mut def = ColumnDef::new(column);
    if backend == DatabaseBackend::Sqlite {
        def.decimal();
    } else {
        def.decimal_len(18, 2);
    }
    def.not_null();
    def
}

#[derive(DeriveIden)]
enum GlTransactions {
    Table,
    Id,
    Date,
    AccountId,
    FundId,
    DepartmentId,
    StateId,
    SectorId,
    ScenarioId,
    Description,
    Amount,
    Balance,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FinancialRecords {
    Table,
    Id,
    AccountId,
    FundId,
    StateId,
    SectorId,
    ScenarioId,
    Year,
    Month,
    Value,
    IsEditable,
    CreatedAt,
    UpdatedAt,
}

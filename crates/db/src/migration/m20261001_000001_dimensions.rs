//! Dimension tables: geography, funds, departments, sectors, scenarios,
//! chart of accounts and the date dimension.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(named_table(Regions::Table, Regions::Id, Regions::Name, Regions::CreatedAt))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(States::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(States::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(States::Name).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(States::RegionId).uuid().not_null())
                    .col(
                        ColumnDef::new(States::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_states_region")
                            .from(States::Table, States::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Locations::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Locations::StateId).uuid().not_null())
                    .col(ColumnDef::new(Locations::RegionId).uuid().not_null())
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_state")
                            .from(Locations::Table, Locations::StateId)
                            .to(States::Table, States::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_region")
                            .from(Locations::Table, Locations::RegionId)
                            .to(Regions::Table, Regions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Funds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Funds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Funds::Name).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(Funds::FundType).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Funds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(named_table(
                Departments::Table,
                Departments::Id,
                Departments::Name,
                Departments::CreatedAt,
            ))
            .await?;

        manager
            .create_table(named_table(Sectors::Table, Sectors::Id, Sectors::Name, Sectors::CreatedAt))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Scenarios::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Scenarios::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Scenarios::Name).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Scenarios::Description).text())
                    .col(
                        ColumnDef::new(Scenarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Code).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Accounts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string_len(20).not_null())
                    .col(ColumnDef::new(Accounts::StatementCategory).string_len(100).not_null())
                    .col(ColumnDef::new(Accounts::HierarchyLevel1).string_len(100))
                    .col(ColumnDef::new(Accounts::HierarchyLevel2).string_len(100))
                    .col(ColumnDef::new(Accounts::HierarchyLevel3).string_len(100))
                    .col(ColumnDef::new(Accounts::HierarchyLevel4).string_len(100))
                    .col(ColumnDef::new(Accounts::ParentId).uuid())
                    .col(ColumnDef::new(Accounts::IsLeaf).boolean().not_null().default(true))
                    .col(ColumnDef::new(Accounts::DisplayOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(Accounts::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_parent")
                            .from(Accounts::Table, Accounts::ParentId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DateDimensions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DateDimensions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(DateDimensions::FullDate).date().not_null().unique_key())
                    .col(ColumnDef::new(DateDimensions::Day).integer().not_null())
                    .col(ColumnDef::new(DateDimensions::WeekOfYear).integer().not_null())
                    .col(ColumnDef::new(DateDimensions::Month).integer().not_null())
                    .col(ColumnDef::new(DateDimensions::MonthName).string_len(20).not_null())
                    .col(ColumnDef::new(DateDimensions::ShortMonthName).string_len(3).not_null())
                    .col(ColumnDef::new(DateDimensions::Quarter).integer().not_null())
                    .col(ColumnDef::new(DateDimensions::QuarterName).string_len(10).not_null())
                    .col(ColumnDef::new(DateDimensions::Year).integer().not_null())
                    .col(ColumnDef::new(DateDimensions::YearMonth).string_len(7).not_null())
                    .col(ColumnDef::new(DateDimensions::YearQuarter).string_len(7).not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            DateDimensions::Table.into_iden(),
            Accounts::Table.into_iden(),
            Scenarios::Table.into_iden(),
            Sectors::Table.into_iden(),
            Departments::Table.into_iden(),
            Funds::Table.into_iden(),
            Locations::Table.into_iden(),
            States::Table.into_iden(),
            Regions::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

/// A table holding only an id, a unique name and a creation timestamp.
fn named_table<T, C>(table: T, id: C, name: C, created_at: C) -> TableCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(id).uuid().not_null().primary_key())
        .col(ColumnDef::new(name).string_len(100).not_null().unique_key())
        .col(ColumnDef::new(created_at).timestamp_with_time_zone().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
pub(crate) enum Regions {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum States {
    Table,
    Id,
    Name,
    RegionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Name,
    StateId,
    RegionId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Funds {
    Table,
    Id,
    Name,
    FundType,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Departments {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Sectors {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Scenarios {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Accounts {
    Table,
    Id,
    Code,
    Name,
    AccountType,
    StatementCategory,
    #[sea_orm(iden = "hierarchy_level1")]
    HierarchyLevel1,
    #[sea_orm(iden = "hierarchy_level2")]
    HierarchyLevel2,
    #[sea_orm(iden = "hierarchy_level3")]
    HierarchyLevel3,
    #[sea_orm(iden = "hierarchy_level4")]
    HierarchyLevel4,
    ParentId,
    IsLeaf,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DateDimensions {
    Table,
    Id,
    FullDate,
    Day,
    WeekOfYear,
    Month,
    MonthName,
    ShortMonthName,
    Quarter,
    QuarterName,
    Year,
    YearMonth,
    YearQuarter,
}

//! `SeaORM` Entity for scenarios table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scenarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::financial_records::Entity")]
    FinancialRecords,
    #[sea_orm(has_many = "super::gl_transactions::Entity")]
    GlTransactions,
}

impl Related<super::financial_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialRecords.def()
    }
}

impl Related<super::gl_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

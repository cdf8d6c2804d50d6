//! `SeaORM` Entity for accounts table (chart of accounts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    /// One of `ASSET`, `LIABILITY`, `EQUITY`, `REVENUE`, `EXPENSE`.
    pub account_type: String,
    pub statement_category: String,
    pub hierarchy_level1: Option<String>,
    pub hierarchy_level2: Option<String>,
    pub hierarchy_level3: Option<String>,
    pub hierarchy_level4: Option<String>,
    pub parent_id: Option<Uuid>,
    pub is_leaf: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

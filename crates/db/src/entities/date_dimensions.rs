//! `SeaORM` Entity for date_dimensions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "date_dimensions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub full_date: Date,
    pub day: i32,
    pub week_of_year: i32,
    pub month: i32,
    pub month_name: String,
    pub short_month_name: String,
    pub quarter: i32,
    pub quarter_name: String,
    pub year: i32,
    pub year_month: String,
    pub year_quarter: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Date dimension repository.

use chrono::NaiveDate;
use fiscora_core::import::DateDimensionRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::BATCH_SIZE;
use crate::entities::date_dimensions::{self, Column};

/// Date dimension persistence. Every function runs on the connection or
/// transaction it is given.
pub struct DateDimensionRepository;

impl DateDimensionRepository {
    /// Inserts or refreshes one row per date.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub async fn upsert_many<C>(conn: &C, records: &[DateDimensionRecord]) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut written = 0;

        for chunk in records.chunks(BATCH_SIZE) {
            let models = chunk.iter().map(|record| date_dimensions::ActiveModel {
                id: Set(Uuid::new_v4()),
                full_date: Set(record.full_date),
                day: Set(record.day),
                week_of_year: Set(record.week_of_year),
                month: Set(record.month),
                month_name: Set(record.month_name.clone()),
                short_month_name: Set(record.short_month_name.clone()),
                quarter: Set(record.quarter),
                quarter_name: Set(record.quarter_name.clone()),
                year: Set(record.year),
                year_month: Set(record.year_month.clone()),
                year_quarter: Set(record.year_quarter.clone()),
            });

            written += date_dimensions::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(Column::FullDate)
                        .update_columns([
                            Column::Day,
                            Column::WeekOfYear,
                            Column::Month,
                            Column::MonthName,
                            Column::ShortMonthName,
                            Column::Quarter,
                            Column::QuarterName,
                            Column::Year,
                            Column::YearMonth,
                            Column::YearQuarter,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(conn)
                .await?;
        }

        Ok(written)
    }

    /// Finds the row for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_date<C>(
        conn: &C,
        date: NaiveDate,
    ) -> Result<Option<date_dimensions::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        date_dimensions::Entity::find()
            .filter(Column::FullDate.eq(date))
            .one(conn)
            .await
    }
}

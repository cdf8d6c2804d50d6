//! Financial record repository: keyed upserts and ACTUAL lookups.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use fiscora_core::forecast::ActualPoint;
use fiscora_core::outcome::AggregationSummary;
use fiscora_core::record::{RecordDraft, RecordKey, Slice};
use fiscora_shared::types::{AccountId, FundId, SectorId, StateId};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{BATCH_SIZE, month_column, month_value};
use crate::entities::financial_records::{self, Column};

/// Financial record persistence. Every function runs on the connection or
/// transaction it is given.
pub struct FinancialRecordRepository;

fn slice_of(model: &financial_records::Model) -> Slice {
    Slice {
        account: AccountId::from_uuid(model.account_id),
        fund: FundId::from_uuid(model.fund_id),
        state: StateId::from_uuid(model.state_id),
        sector: SectorId::from_uuid(model.sector_id),
    }
}

fn key_of(model: &financial_records::Model) -> Result<RecordKey, DbErr> {
    Ok(RecordKey {
        slice: slice_of(model),
        year: model.year,
        month: month_value(model.month)?,
    })
}

impl FinancialRecordRepository {
    /// Keys already stored for a scenario in the given fiscal years.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn existing_keys<C>(
        conn: &C,
        scenario_id: Uuid,
        years: &[i32],
    ) -> Result<HashSet<RecordKey>, DbErr>
    where
        C: ConnectionTrait,
    {
        if years.is_empty() {
            return Ok(HashSet::new());
        }

        financial_records::Entity::find()
            .filter(Column::ScenarioId.eq(scenario_id))
            .filter(Column::Year.is_in(years.iter().copied()))
            .all(conn)
            .await?
            .iter()
            .map(key_of)
            .collect()
    }

    /// Inserts or overwrites one record per draft under `scenario_id`.
    ///
    /// Conflicts on the record key update `value` and `is_editable` in
    /// place, so re-running never duplicates. Counts are taken against the
    /// keys visible on `conn` before the write.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn upsert<C>(
        conn: &C,
        scenario_id: Uuid,
        drafts: &[RecordDraft],
    ) -> Result<AggregationSummary, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut summary = AggregationSummary::default();
        if drafts.is_empty() {
            return Ok(summary);
        }

        let years: Vec<i32> = drafts
            .iter()
            .map(|draft| draft.key.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let existing = Self::existing_keys(conn, scenario_id, &years).await?;
        for draft in drafts {
            if existing.contains(&draft.key) {
                summary.updated += 1;
            } else {
                summary.created += 1;
            }
        }

        let now = chrono::Utc::now();
        for chunk in drafts.chunks(BATCH_SIZE) {
            let models = chunk.iter().map(|draft| financial_records::ActiveModel {
                id: Set(Uuid::new_v4()),
                account_id: Set(draft.key.slice.account.into_inner()),
                fund_id: Set(draft.key.slice.fund.into_inner()),
                state_id: Set(draft.key.slice.state.into_inner()),
                sector_id: Set(draft.key.slice.sector.into_inner()),
                scenario_id: Set(scenario_id),
                year: Set(draft.key.year),
                month: Set(month_column(draft.key.month)),
                value: Set(draft.value),
                is_editable: Set(draft.is_editable),
                created_at: Set(now),
                updated_at: Set(now),
            });

            financial_records::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([
                        Column::AccountId,
                        Column::FundId,
                        Column::StateId,
                        Column::SectorId,
                        Column::Year,
                        Column::Month,
                        Column::ScenarioId,
                    ])
                    .update_columns([Column::Value, Column::IsEditable, Column::UpdatedAt])
                    .to_owned(),
                )
                .exec_without_returning(conn)
                .await?;
        }

        Ok(summary)
    }

    /// Distinct slices with records of `scenario_id` labelled `fiscal_year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn slices_in_year<C>(
        conn: &C,
        scenario_id: Uuid,
        fiscal_year: i32,
    ) -> Result<BTreeSet<Slice>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = financial_records::Entity::find()
            .filter(Column::ScenarioId.eq(scenario_id))
            .filter(Column::Year.eq(fiscal_year))
            .all(conn)
            .await?;

        Ok(rows.iter().map(slice_of).collect())
    }

    /// Stored values of `scenario_id` with a year label up to `max_year`,
    /// grouped by slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn points_until<C>(
        conn: &C,
        scenario_id: Uuid,
        max_year: i32,
    ) -> Result<BTreeMap<Slice, Vec<ActualPoint>>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = financial_records::Entity::find()
            .filter(Column::ScenarioId.eq(scenario_id))
            .filter(Column::Year.lte(max_year))
            .all(conn)
            .await?;

        let mut points: BTreeMap<Slice, Vec<ActualPoint>> = BTreeMap::new();
        for row in rows {
            points.entry(slice_of(&row)).or_default().push(ActualPoint {
                year: row.year,
                month: month_value(row.month)?,
                value: row.value,
            });
        }
        Ok(points)
    }

    /// Finds the record stored under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find<C>(
        conn: &C,
        scenario_id: Uuid,
        key: &RecordKey,
    ) -> Result<Option<financial_records::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        financial_records::Entity::find()
            .filter(Column::ScenarioId.eq(scenario_id))
            .filter(Column::AccountId.eq(key.slice.account.into_inner()))
            .filter(Column::FundId.eq(key.slice.fund.into_inner()))
            .filter(Column::StateId.eq(key.slice.state.into_inner()))
            .filter(Column::SectorId.eq(key.slice.sector.into_inner()))
            .filter(Column::Year.eq(key.year))
            .filter(Column::Month.eq(month_column(key.month)))
            .one(conn)
            .await
    }

    /// All records of a scenario ordered by year and month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_scenario<C>(
        conn: &C,
        scenario_id: Uuid,
    ) -> Result<Vec<financial_records::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        financial_records::Entity::find()
            .filter(Column::ScenarioId.eq(scenario_id))
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Month)
            .all(conn)
            .await
    }
}

//! Ledger repository: GL transaction writes and reads.

use chrono::NaiveDate;
use fiscora_core::import::NewGlTransaction;
use fiscora_core::ledger::LedgerLine;
use fiscora_core::record::Slice;
use fiscora_shared::types::{AccountId, FundId, SectorId, StateId};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::BATCH_SIZE;
use crate::entities::gl_transactions;

/// GL transaction persistence. Every function runs on the connection or
/// transaction it is given.
pub struct LedgerRepository;

impl LedgerRepository {
    /// Bulk-inserts imported transactions under a scenario with a zero
    /// running balance.
    ///
    /// # Errors
    ///
    /// Returns an error if an insert fails.
    pub async fn insert_transactions<C>(
        conn: &C,
        scenario_id: Uuid,
        transactions: &[NewGlTransaction],
    ) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        let mut inserted = 0;

        for chunk in transactions.chunks(BATCH_SIZE) {
            let models = chunk.iter().map(|tx| gl_transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                date: Set(tx.date),
                account_id: Set(tx.slice.account.into_inner()),
                fund_id: Set(tx.slice.fund.into_inner()),
                department_id: Set(tx.department.into_inner()),
                state_id: Set(tx.slice.state.into_inner()),
                sector_id: Set(tx.slice.sector.into_inner()),
                scenario_id: Set(scenario_id),
                description: Set(tx.description.clone()),
                amount: Set(tx.amount),
                balance: Set(Decimal::ZERO),
                created_at: Set(now),
            });
            inserted += gl_transactions::Entity::insert_many(models)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(inserted)
    }

    /// Ledger lines of a scenario dated from `start` through `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn lines_between<C>(
        conn: &C,
        scenario_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerLine>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = gl_transactions::Entity::find()
            .filter(gl_transactions::Column::ScenarioId.eq(scenario_id))
            .filter(gl_transactions::Column::Date.gte(start))
            .filter(gl_transactions::Column::Date.lte(end))
            .order_by_asc(gl_transactions::Column::Date)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| LedgerLine {
                slice: Slice {
                    account: AccountId::from_uuid(row.account_id),
                    fund: FundId::from_uuid(row.fund_id),
                    state: StateId::from_uuid(row.state_id),
                    sector: SectorId::from_uuid(row.sector_id),
                },
                date: row.date,
                amount: row.amount,
            })
            .collect())
    }
}

//! Chart of accounts repository.

use std::collections::HashMap;

use fiscora_core::import::AccountRecord;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::BATCH_SIZE;
use crate::entities::accounts::{self, Column};

/// An account row with its id and parent already resolved.
#[derive(Debug, Clone)]
pub struct ResolvedAccount {
    /// Id of the existing row, or a fresh one for a new code.
    pub id: Uuid,
    /// Parent account id.
    pub parent_id: Option<Uuid>,
    /// Parsed CSV row.
    pub record: AccountRecord,
}

/// Account persistence. Every function runs on the connection or transaction
/// it is given.
pub struct AccountRepository;

impl AccountRepository {
    /// Map of every stored account code to its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn code_index<C>(conn: &C) -> Result<HashMap<String, Uuid>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(accounts::Entity::find()
            .all(conn)
            .await?
            .into_iter()
            .map(|account| (account.code, account.id))
            .collect())
    }

    /// Finds an account by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code<C>(conn: &C, code: &str) -> Result<Option<accounts::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        accounts::Entity::find()
            .filter(Column::Code.eq(code))
            .one(conn)
            .await
    }

    /// Inserts or updates accounts by code, in order.
    ///
    /// Parents must appear before their children so the parent row exists
    /// when the child is written.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub async fn upsert_many<C>(conn: &C, accounts: &[ResolvedAccount]) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        let mut written = 0;

        for chunk in accounts.chunks(BATCH_SIZE) {
            let models = chunk.iter().map(|account| {
                let record = &account.record;
                let [level1, level2, level3, level4] = record.hierarchy.clone();
                accounts::ActiveModel {
                    id: Set(account.id),
                    code: Set(record.code.clone()),
                    name: Set(record.name.clone()),
                    account_type: Set(record.account_type.as_str().to_string()),
                    statement_category: Set(record.statement_category.clone()),
                    hierarchy_level1: Set(level1),
                    hierarchy_level2: Set(level2),
                    hierarchy_level3: Set(level3),
                    hierarchy_level4: Set(level4),
                    parent_id: Set(account.parent_id),
                    is_leaf: Set(record.is_leaf),
                    display_order: Set(record.display_order),
                    is_active: Set(record.is_active),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
            });

            written += accounts::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::column(Column::Code)
                        .update_columns([
                            Column::Name,
                            Column::AccountType,
                            Column::StatementCategory,
                            Column::HierarchyLevel1,
                            Column::HierarchyLevel2,
                            Column::HierarchyLevel3,
                            Column::HierarchyLevel4,
                            Column::ParentId,
                            Column::IsLeaf,
                            Column::DisplayOrder,
                            Column::IsActive,
                            Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(conn)
                .await?;
        }

        Ok(written)
    }
}

//! Bulk CSV imports.
//!
//! Files are parsed and validated in full before anything is written; the
//! writes then happen in one transaction.

use std::collections::HashMap;

use fiscora_core::import::{
    AccountRecord, ImportError, ImportKind, RowError, parse_accounts, parse_date_dimensions,
    parse_gl_transactions,
};
use fiscora_core::outcome::{ImportSummary, JobOutcome};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use super::JobError;
use crate::repositories::{
    AccountRepository, DateDimensionRepository, DimensionRepository, LedgerRepository,
    ResolvedAccount, ScenarioRepository,
};

/// Runs the GL, chart of accounts and date dimension imports.
#[derive(Debug, Clone)]
pub struct ImportService {
    db: DatabaseConnection,
    actual_scenario: String,
}

impl ImportService {
    /// Creates an import service tagging GL rows with `actual_scenario`.
    #[must_use]
    pub fn new(db: DatabaseConnection, actual_scenario: impl Into<String>) -> Self {
        Self {
            db,
            actual_scenario: actual_scenario.into(),
        }
    }

    /// Imports GL transactions as ACTUAL ledger entries.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Import` if any row is invalid or refers to an
    /// unknown dimension, or `JobError::Database` if a write fails.
    pub async fn import_gl_transactions(
        &self,
        csv: &[u8],
    ) -> Result<JobOutcome<ImportSummary>, JobError> {
        let Some(scenario) = ScenarioRepository::new(self.db.clone())
            .find_by_name(&self.actual_scenario)
            .await?
        else {
            warn!(scenario = %self.actual_scenario, "Scenario not defined, rejecting GL import");
            return Ok(JobOutcome::ScenarioMissing {
                name: self.actual_scenario.clone(),
            });
        };

        let index = DimensionRepository::new(self.db.clone())
            .lookup_index()
            .await?;
        let transactions = parse_gl_transactions(csv, &index)?;

        let txn = self.db.begin().await?;
        let rows = LedgerRepository::insert_transactions(&txn, scenario.id, &transactions).await?;
        txn.commit().await?;

        info!(rows, "GL transactions imported");
        Ok(JobOutcome::Completed(ImportSummary {
            kind: ImportKind::GlTransactions,
            rows,
        }))
    }

    /// Imports the chart of accounts, upserting by account code.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Import` if any row is invalid, repeats a code or
    /// names a parent that neither exists nor appears earlier in the file.
    pub async fn import_accounts(&self, csv: &[u8]) -> Result<ImportSummary, JobError> {
        let records = parse_accounts(csv)?;

        let txn = self.db.begin().await?;
        let known = AccountRepository::code_index(&txn).await?;
        let resolved = resolve_accounts(known, records)?;
        let rows = AccountRepository::upsert_many(&txn, &resolved).await?;
        txn.commit().await?;

        info!(accounts = resolved.len(), "Chart of accounts imported");
        Ok(ImportSummary {
            kind: ImportKind::Accounts,
            rows,
        })
    }

    /// Imports the date dimension, upserting by date.
    ///
    /// # Errors
    ///
    /// Returns `JobError::Import` if any row is invalid.
    pub async fn import_date_dimensions(&self, csv: &[u8]) -> Result<ImportSummary, JobError> {
        let records = parse_date_dimensions(csv)?;

        let txn = self.db.begin().await?;
        let rows = DateDimensionRepository::upsert_many(&txn, &records).await?;
        txn.commit().await?;

        info!(rows, "Date dimension imported");
        Ok(ImportSummary {
            kind: ImportKind::DateDimensions,
            rows,
        })
    }
}

/// Assigns ids and resolves parent codes in file order.
///
/// A parent resolves if it is already stored or defined on an earlier row.
fn resolve_accounts(
    mut known: HashMap<String, Uuid>,
    records: Vec<AccountRecord>,
) -> Result<Vec<ResolvedAccount>, ImportError> {
    let mut seen_in_file: HashMap<String, usize> = HashMap::new();
    let mut resolved = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let row = index + 1;

        if let Some(first) = seen_in_file.insert(record.code.clone(), row) {
            errors.push(RowError::new(
                row,
                format!("Duplicate AccountCode '{}', first seen on row {first}", record.code),
            ));
            continue;
        }

        let parent_id = match &record.parent_code {
            Some(code) => match known.get(code) {
                Some(id) => Some(*id),
                None => {
                    errors.push(RowError::new(
                        row,
                        format!("Parent account '{code}' not found"),
                    ));
                    continue;
                }
            },
            None => None,
        };

        let id = *known
            .entry(record.code.clone())
            .or_insert_with(Uuid::new_v4);
        resolved.push(ResolvedAccount {
            id,
            parent_id,
            record,
        });
    }

    if errors.is_empty() {
        Ok(resolved)
    } else {
        Err(ImportError::InvalidRows(errors))
    }
}

//! Dimension repository: regions, states, locations, funds, departments and
//! sectors, plus the lookup index used by the GL import.

use std::fmt;
use std::str::FromStr;

use fiscora_core::import::DimensionIndex;
use fiscora_shared::types::{AccountId, DepartmentId, FundId, SectorId, StateId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{accounts, departments, funds, locations, regions, sectors, states};

/// Error types for dimension operations.
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    /// Region not found.
    #[error("Region not found: {0}")]
    RegionNotFound(Uuid),

    /// State not found.
    #[error("State not found: {0}")]
    StateNotFound(Uuid),

    /// Unknown fund type.
    #[error("Invalid fund type '{0}', expected MUTUAL or RSA")]
    InvalidFundType(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Fund classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundType {
    /// Mutual fund.
    Mutual,
    /// Retirement savings account.
    Rsa,
}

impl FundType {
    /// Stored form of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mutual => "MUTUAL",
            Self::Rsa => "RSA",
        }
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundType {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MUTUAL" => Ok(Self::Mutual),
            "RSA" => Ok(Self::Rsa),
            _ => Err(DimensionError::InvalidFundType(s.to_string())),
        }
    }
}

/// Dimension repository.
///
/// The `ensure_*` helpers return the row with the given name, creating it
/// first if it does not exist.
#[derive(Debug, Clone)]
pub struct DimensionRepository {
    db: DatabaseConnection,
}

impl DimensionRepository {
    /// Creates a new dimension repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the named region, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure_region(&self, name: &str) -> Result<regions::Model, DimensionError> {
        if let Some(existing) = regions::Entity::find()
            .filter(regions::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let region = regions::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(region)
    }

    /// Returns the named state, creating it under `region_id` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The region does not exist
    /// - The database query fails
    pub async fn ensure_state(
        &self,
        name: &str,
        region_id: Uuid,
    ) -> Result<states::Model, DimensionError> {
        if let Some(existing) = states::Entity::find()
            .filter(states::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        regions::Entity::find_by_id(region_id)
            .one(&self.db)
            .await?
            .ok_or(DimensionError::RegionNotFound(region_id))?;

        let state = states::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            region_id: Set(region_id),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(state)
    }

    /// Creates a location in a state. The region is copied from the state.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state does not exist
    /// - The database query fails
    pub async fn create_location(
        &self,
        name: &str,
        state_id: Uuid,
    ) -> Result<locations::Model, DimensionError> {
        let state = states::Entity::find_by_id(state_id)
            .one(&self.db)
            .await?
            .ok_or(DimensionError::StateNotFound(state_id))?;

        let location = locations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            state_id: Set(state.id),
            region_id: Set(state.region_id),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(location)
    }

    /// Returns the named fund, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure_fund(
        &self,
        name: &str,
        fund_type: FundType,
    ) -> Result<funds::Model, DimensionError> {
        if let Some(existing) = funds::Entity::find()
            .filter(funds::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let fund = funds::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            fund_type: Set(fund_type.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(fund)
    }

    /// Returns the named department, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure_department(
        &self,
        name: &str,
    ) -> Result<departments::Model, DimensionError> {
        if let Some(existing) = departments::Entity::find()
            .filter(departments::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let department = departments::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(department)
    }

    /// Returns the named sector, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure_sector(&self, name: &str) -> Result<sectors::Model, DimensionError> {
        if let Some(existing) = sectors::Entity::find()
            .filter(sectors::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let sector = sectors::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(sector)
    }

    /// Loads every account code and dimension name for GL import lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn lookup_index(&self) -> Result<DimensionIndex, DimensionError> {
        let mut index = DimensionIndex::default();

        for account in accounts::Entity::find().all(&self.db).await? {
            index
                .accounts
                .insert(account.code, AccountId::from_uuid(account.id));
        }
        for fund in funds::Entity::find().all(&self.db).await? {
            index.funds.insert(fund.name, FundId::from_uuid(fund.id));
        }
        for department in departments::Entity::find().all(&self.db).await? {
            index
                .departments
                .insert(department.name, DepartmentId::from_uuid(department.id));
        }
        for state in states::Entity::find().all(&self.db).await? {
            index.states.insert(state.name, StateId::from_uuid(state.id));
        }
        for sector in sectors::Entity::find().all(&self.db).await? {
            index.sectors.insert(sector.name, SectorId::from_uuid(sector.id));
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_type_parsing() {
        assert_eq!("mutual".parse::<FundType>().ok(), Some(FundType::Mutual));
        assert_eq!(" RSA ".parse::<FundType>().ok(), Some(FundType::Rsa));
        assert!(matches!(
            "PENSION".parse::<FundType>(),
            Err(DimensionError::InvalidFundType(name)) if name == "PENSION"
        ));
    }
}

//! Scenario repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::scenarios;

/// Scenario lookups and creation.
#[derive(Debug, Clone)]
pub struct ScenarioRepository {
    db: DatabaseConnection,
}

impl ScenarioRepository {
    /// Creates a new scenario repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a scenario by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<scenarios::Model>, DbErr> {
        scenarios::Entity::find()
            .filter(scenarios::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Returns the named scenario, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn ensure(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<scenarios::Model, DbErr> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        scenarios::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.map(ToString::to_string)),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists all scenarios by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<scenarios::Model>, DbErr> {
        scenarios::Entity::find()
            .order_by_asc(scenarios::Column::Name)
            .all(&self.db)
            .await
    }
}

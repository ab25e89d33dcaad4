//! Database queries for configuration records.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
    Set,
};
use uuid::Uuid;

use crate::entity::configuration::{self, ActiveModel, Entity as Configuration};
use crate::error::{AppError, AppResult};
use crate::models::{CreateConfigurationRequest, ListConfigurationsQuery, UpdateConfigurationRequest};

use super::DbPool;

/// Build the list select with any set filters applied.
///
/// Unset filters add no conditions, so the empty query selects every row.
fn filtered_configurations(query: &ListConfigurationsQuery) -> Select<Configuration> {
    let mut select = Configuration::find();

    if let Some(ref config_type) = query.config_type {
        select = select.filter(configuration::Column::ConfigType.eq(config_type.as_str()));
    }

    if let Some(ref environment) = query.environment {
        select = select.filter(configuration::Column::Environment.eq(environment.as_str()));
    }

    select
}

impl DbPool {
    /// Insert a new configuration record.
    ///
    /// Fails with Conflict when a record with the same name already exists
    /// in the environment.
    pub async fn insert_configuration(
        &self,
        req: &CreateConfigurationRequest,
    ) -> AppResult<configuration::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(req.name.clone()),
            config_type: Set(req.config_type.clone()),
            category: Set(req.category.clone()),
            description: Set(req.description.clone()),
            status: Set(req.status.clone()),
            environment: Set(req.environment.clone()),
            modified_by: Set(req.modified_by.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.connection()).await.map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                AppError::Conflict(format!(
                    "configuration '{}' already exists in environment '{}'",
                    req.name, req.environment
                ))
            } else {
                AppError::Database(format!("Failed to insert configuration: {}", e))
            }
        })
    }

    /// Get a configuration record by ID.
    pub async fn get_configuration(&self, id: Uuid) -> AppResult<Option<configuration::Model>> {
        let result = Configuration::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get configuration: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update to a configuration record.
    pub async fn update_configuration(
        &self,
        id: Uuid,
        req: &UpdateConfigurationRequest,
    ) -> AppResult<configuration::Model> {
        let current = self
            .get_configuration(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Configuration {}", id)))?;

        let mut active: ActiveModel = current.into();

        if let Some(ref config_type) = req.config_type {
            active.config_type = Set(config_type.clone());
        }
        if let Some(ref category) = req.category {
            active.category = Set(category.clone());
        }
        if let Some(ref description) = req.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(ref status) = req.status {
            active.status = Set(status.clone());
        }
        if let Some(ref modified_by) = req.modified_by {
            active.modified_by = Set(modified_by.clone());
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update configuration: {}", e)))?;

        Ok(result)
    }

    /// Delete a configuration record. Returns whether a row was removed.
    pub async fn delete_configuration(&self, id: Uuid) -> AppResult<bool> {
        let result = Configuration::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete configuration: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// List configuration records with optional filtering, most recently
    /// modified first.
    pub async fn list_configurations(
        &self,
        query: &ListConfigurationsQuery,
    ) -> AppResult<(Vec<configuration::Model>, u64)> {
        let select = filtered_configurations(query);

        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count configurations: {}", e)))?;

        let configurations = select
            .order_by_desc(configuration::Column::UpdatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list configurations: {}", e)))?;

        Ok((configurations, total))
    }

    /// Count configuration records modified within the last day.
    pub async fn count_recent_config_changes(&self) -> AppResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::hours(24);

        let count = Configuration::find()
            .filter(configuration::Column::UpdatedAt.gte(cutoff))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count configurations: {}", e)))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_no_filters_selects_every_row() {
        let sql = filtered_configurations(&ListConfigurationsQuery::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "unexpected filter in: {}", sql);
    }

    #[test]
    fn test_set_filters_constrain_the_query() {
        let query = ListConfigurationsQuery {
            config_type: Some("integration".to_string()),
            environment: Some("production".to_string()),
        };
        let sql = filtered_configurations(&query)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("WHERE"));
        assert!(sql.contains("integration"));
        assert!(sql.contains("production"));
    }
}

//! Database queries for alerts.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entity::alert::{self, ActiveModel, Entity as Alert};
use crate::error::{AppError, AppResult};
use crate::models::alert::merge_acknowledgement;
use crate::models::{AlertStatus, CreateAlertRequest, ListAlertsQuery};

use super::DbPool;

/// Build the list select with any set filters applied.
///
/// Unset filters add no conditions, so the empty query selects every row.
fn filtered_alerts(query: &ListAlertsQuery) -> Select<Alert> {
    let mut select = Alert::find();

    if let Some(status) = query.status {
        select = select.filter(alert::Column::Status.eq(status.as_str()));
    }

    if let Some(severity) = query.severity {
        select = select.filter(alert::Column::Severity.eq(severity.as_str()));
    }

    if let Some(source) = query.source {
        select = select.filter(alert::Column::Source.eq(source.as_str()));
    }

    select
}

impl DbPool {
    /// Insert a new alert in active, unacknowledged state.
    pub async fn insert_alert(&self, req: &CreateAlertRequest) -> AppResult<alert::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            kind: Set(req.kind.as_str().to_string()),
            severity: Set(req.severity.as_str().to_string()),
            message: Set(req.message.clone()),
            description: Set(req.description.clone()),
            source: Set(req.source.as_str().to_string()),
            source_id: Set(req.source_id.clone()),
            source_name: Set(req.source_name.clone()),
            environment: Set(req.environment.clone()),
            tags: Set(serde_json::to_value(&req.tags)?),
            status: Set(AlertStatus::Active.as_str().to_string()),
            acknowledged: Set(false),
            acknowledged_by: Set(None),
            acknowledged_at: Set(None),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert alert: {}", e)))?;

        Ok(result)
    }

    /// Get an alert by ID.
    pub async fn get_alert(&self, id: Uuid) -> AppResult<Option<alert::Model>> {
        let result = Alert::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get alert: {}", e)))?;

        Ok(result)
    }

    /// Acknowledge an alert. Idempotent: an already-acknowledged alert keeps
    /// its original actor and timestamp, and the flag never clears.
    pub async fn acknowledge_alert(&self, id: Uuid, by: &str) -> AppResult<alert::Model> {
        let current = self
            .get_alert(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Alert {}", id)))?;

        let (acknowledged, acknowledged_by, acknowledged_at) = merge_acknowledgement(
            (
                current.acknowledged,
                current.acknowledged_by.clone(),
                current.acknowledged_at,
            ),
            by,
            Utc::now(),
        );

        // The merge is the identity for an already-acknowledged alert
        if acknowledged == current.acknowledged {
            return Ok(current);
        }

        let mut active: ActiveModel = current.into();
        active.acknowledged = Set(acknowledged);
        active.acknowledged_by = Set(acknowledged_by);
        active.acknowledged_at = Set(acknowledged_at);

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to acknowledge alert: {}", e)))?;

        Ok(result)
    }

    /// Mark an alert resolved. Acknowledgement state is left untouched.
    pub async fn resolve_alert(&self, id: Uuid) -> AppResult<alert::Model> {
        let current = self
            .get_alert(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Alert {}", id)))?;

        let mut active: ActiveModel = current.into();
        active.status = Set(AlertStatus::Resolved.as_str().to_string());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to resolve alert: {}", e)))?;

        Ok(result)
    }

    /// List alerts with optional filtering, newest first.
    pub async fn list_alerts(
        &self,
        query: &ListAlertsQuery,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<alert::Model>, u64)> {
        let select = filtered_alerts(query);

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count alerts: {}", e)))?;

        let alerts = select
            .order_by_desc(alert::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list alerts: {}", e)))?;

        Ok((alerts, total))
    }

    /// Count active, unacknowledged alerts (the dashboard badge).
    pub async fn count_open_alerts(&self) -> AppResult<u64> {
        let count = Alert::find()
            .filter(alert::Column::Status.eq(AlertStatus::Active.as_str()))
            .filter(alert::Column::Acknowledged.eq(false))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count alerts: {}", e)))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;
    use crate::models::{AlertSeverity, AlertSource};

    #[test]
    fn test_no_filters_selects_every_row() {
        let sql = filtered_alerts(&ListAlertsQuery::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "unexpected filter in: {}", sql);
    }

    #[test]
    fn test_set_filters_constrain_the_query() {
        let query = ListAlertsQuery {
            severity: Some(AlertSeverity::Critical),
            source: Some(AlertSource::Security),
            ..Default::default()
        };
        let sql = filtered_alerts(&query)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("WHERE"));
        assert!(sql.contains("critical"));
        assert!(sql.contains("security"));
    }
}

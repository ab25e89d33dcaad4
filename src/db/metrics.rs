//! Database queries for daily metric snapshots.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::metric::{self, ActiveModel, Entity as Metric};
use crate::error::{AppError, AppResult};
use crate::models::{CiTool, ListMetricsQuery, UpsertMetricRequest};

use super::DbPool;

impl DbPool {
    /// Get the snapshot for a `(date, tool)` pair.
    pub async fn get_metric(
        &self,
        date: NaiveDate,
        tool: CiTool,
    ) -> AppResult<Option<metric::Model>> {
        let result = Metric::find()
            .filter(metric::Column::Date.eq(date))
            .filter(metric::Column::Tool.eq(tool.as_str()))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get metric: {}", e)))?;

        Ok(result)
    }

    /// Insert or replace the snapshot for a `(date, tool)` pair.
    ///
    /// The unique index on `(date, tool)` guarantees at most one row per
    /// pair; concurrent inserts surface as Conflict.
    pub async fn upsert_metric(
        &self,
        date: NaiveDate,
        tool: CiTool,
        req: &UpsertMetricRequest,
    ) -> AppResult<metric::Model> {
        let existing = self.get_metric(date, tool).await?;

        let result = match existing {
            Some(current) => {
                let mut active: ActiveModel = current.into();
                active.total_pipelines = Set(req.total_pipelines);
                active.total_builds = Set(req.total_builds);
                active.success_rate = Set(req.success_rate);
                active.failure_rate = Set(req.failure_rate);
                active.average_build_time_secs = Set(req.average_build_time_secs);
                active.average_pipeline_time_secs = Set(req.average_pipeline_time_secs);
                active.deployments = Set(req.deployments);
                active.deployment_success_rate = Set(req.deployment_success_rate);
                active.code_coverage = Set(req.code_coverage);
                active.test_pass_rate = Set(req.test_pass_rate);

                active
                    .update(self.connection())
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to update metric: {}", e)))?
            }
            None => {
                let model = ActiveModel {
                    id: Set(Uuid::now_v7()),
                    date: Set(date),
                    tool: Set(tool.as_str().to_string()),
                    total_pipelines: Set(req.total_pipelines),
                    total_builds: Set(req.total_builds),
                    success_rate: Set(req.success_rate),
                    failure_rate: Set(req.failure_rate),
                    average_build_time_secs: Set(req.average_build_time_secs),
                    average_pipeline_time_secs: Set(req.average_pipeline_time_secs),
                    deployments: Set(req.deployments),
                    deployment_success_rate: Set(req.deployment_success_rate),
                    code_coverage: Set(req.code_coverage),
                    test_pass_rate: Set(req.test_pass_rate),
                    created_at: Set(Utc::now()),
                };

                model.insert(self.connection()).await.map_err(|e| {
                    if matches!(
                        e.sql_err(),
                        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                    ) {
                        AppError::Conflict(format!(
                            "metric snapshot for ({}, {}) already exists",
                            date, tool
                        ))
                    } else {
                        AppError::Database(format!("Failed to insert metric: {}", e))
                    }
                })?
            }
        };

        Ok(result)
    }

    /// List snapshots filtered by tool and inclusive date range, newest first.
    pub async fn list_metrics(&self, query: &ListMetricsQuery) -> AppResult<Vec<metric::Model>> {
        let mut select = Metric::find();

        if let Some(tool) = query.tool {
            select = select.filter(metric::Column::Tool.eq(tool.as_str()));
        }

        if let Some(from) = query.from {
            select = select.filter(metric::Column::Date.gte(from));
        }

        if let Some(to) = query.to {
            select = select.filter(metric::Column::Date.lte(to));
        }

        let metrics = select
            .order_by_desc(metric::Column::Date)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list metrics: {}", e)))?;

        Ok(metrics)
    }
}

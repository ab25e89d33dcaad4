//! Database queries for pipelines.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entity::pipeline::{self, ActiveModel, Entity as Pipeline};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePipelineRequest, ListPipelinesQuery, PipelineStatsResponse, PipelineStatus,
    UpdatePipelineRequest,
};

use super::DbPool;

/// Fold per-pipeline rows into the stats response.
///
/// Mirrors the per-status grouping the dashboard expects; the average is
/// taken over pipelines that have recorded a duration.
pub fn fold_pipeline_stats(rows: &[(String, Option<f64>)]) -> PipelineStatsResponse {
    let mut stats = PipelineStatsResponse::default();
    let mut duration_sum = 0.0;
    let mut duration_count = 0u64;

    for (status, duration) in rows {
        stats.total += 1;
        match PipelineStatus::parse(status) {
            Some(PipelineStatus::Active) => stats.active += 1,
            Some(PipelineStatus::Inactive) => stats.inactive += 1,
            Some(PipelineStatus::Draft) => stats.draft += 1,
            None => {}
        }
        if let Some(d) = duration {
            duration_sum += d;
            duration_count += 1;
        }
    }

    if duration_count > 0 {
        stats.avg_duration_secs = duration_sum / duration_count as f64;
    }

    stats
}

/// Build the list select with any set filters applied.
///
/// Unset filters add no conditions, so the empty query selects every row.
fn filtered_pipelines(query: &ListPipelinesQuery) -> Select<Pipeline> {
    let mut select = Pipeline::find();

    if let Some(tool) = query.tool {
        select = select.filter(pipeline::Column::Tool.eq(tool.as_str()));
    }

    if let Some(status) = query.status {
        select = select.filter(pipeline::Column::Status.eq(status.as_str()));
    }

    // Case-insensitive substring match on repository
    if let Some(ref repository) = query.repository {
        let pattern = format!("%{}%", repository.replace('%', "\\%").replace('_', "\\_"));
        select = select.filter(Expr::col(pipeline::Column::Repository).ilike(pattern));
    }

    select
}

impl DbPool {
    /// Insert a new pipeline. Fails with Conflict on a duplicate business key.
    pub async fn insert_pipeline(
        &self,
        req: &CreatePipelineRequest,
    ) -> AppResult<pipeline::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            pipeline_id: Set(req.pipeline_id.clone()),
            name: Set(req.name.clone()),
            description: Set(req.description.clone()),
            repository: Set(req.repository.clone()),
            branch: Set(req.branch.clone()),
            tool: Set(req.tool.as_str().to_string()),
            status: Set(req.status.as_str().to_string()),
            trigger_type: Set(req.trigger_type.as_str().to_string()),
            environment: Set(req.environment.clone()),
            last_status: Set(None),
            started_at: Set(None),
            average_duration_secs: Set(None),
            success_rate: Set(0.0),
            total_runs: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.connection()).await.map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                AppError::Conflict(format!("pipeline '{}' already exists", req.pipeline_id))
            } else {
                AppError::Database(format!("Failed to insert pipeline: {}", e))
            }
        })
    }

    /// Get a pipeline by its business key.
    pub async fn get_pipeline(&self, pipeline_id: &str) -> AppResult<Option<pipeline::Model>> {
        let result = Pipeline::find()
            .filter(pipeline::Column::PipelineId.eq(pipeline_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get pipeline: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update to a pipeline.
    pub async fn update_pipeline(
        &self,
        pipeline_id: &str,
        req: &UpdatePipelineRequest,
    ) -> AppResult<pipeline::Model> {
        let current = self
            .get_pipeline(pipeline_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pipeline {}", pipeline_id)))?;

        let mut active: ActiveModel = current.into();

        if let Some(ref name) = req.name {
            active.name = Set(name.clone());
        }
        if let Some(ref description) = req.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(ref repository) = req.repository {
            active.repository = Set(repository.clone());
        }
        if let Some(ref branch) = req.branch {
            active.branch = Set(branch.clone());
        }
        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(trigger_type) = req.trigger_type {
            active.trigger_type = Set(trigger_type.as_str().to_string());
        }
        if let Some(ref environment) = req.environment {
            active.environment = Set(environment.clone());
        }
        if let Some(last_status) = req.last_status {
            active.last_status = Set(Some(last_status.as_str().to_string()));
        }
        if let Some(started_at) = req.started_at {
            active.started_at = Set(Some(started_at));
        }
        if let Some(avg) = req.average_duration_secs {
            active.average_duration_secs = Set(Some(avg));
        }
        if let Some(rate) = req.success_rate {
            active.success_rate = Set(rate);
        }
        if let Some(runs) = req.total_runs {
            active.total_runs = Set(runs);
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update pipeline: {}", e)))?;

        Ok(result)
    }

    /// Delete a pipeline by business key. Returns whether a row was removed.
    pub async fn delete_pipeline(&self, pipeline_id: &str) -> AppResult<bool> {
        let result = Pipeline::delete_many()
            .filter(pipeline::Column::PipelineId.eq(pipeline_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete pipeline: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// List pipelines with optional filtering, newest first.
    ///
    /// With no filters set this returns the full set (paginated).
    pub async fn list_pipelines(
        &self,
        query: &ListPipelinesQuery,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<pipeline::Model>, u64)> {
        let select = filtered_pipelines(query);

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count pipelines: {}", e)))?;

        let pipelines = select
            .order_by_desc(pipeline::Column::StartedAt)
            .order_by_desc(pipeline::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list pipelines: {}", e)))?;

        Ok((pipelines, total))
    }

    /// Per-status pipeline counts with average run duration.
    pub async fn pipeline_stats(&self) -> AppResult<PipelineStatsResponse> {
        let rows: Vec<(String, Option<f64>)> = Pipeline::find()
            .select_only()
            .column(pipeline::Column::Status)
            .column(pipeline::Column::AverageDurationSecs)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load pipeline stats: {}", e)))?;

        Ok(fold_pipeline_stats(&rows))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_fold_counts_by_status() {
        let rows = vec![
            ("active".to_string(), Some(300.0)),
            ("active".to_string(), Some(500.0)),
            ("inactive".to_string(), None),
            ("draft".to_string(), None),
        ];
        let stats = fold_pipeline_stats(&rows);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.draft, 1);
        assert!((stats.avg_duration_secs - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fold_empty_rows() {
        let stats = fold_pipeline_stats(&[]);
        assert_eq!(stats, PipelineStatsResponse::default());
    }

    #[test]
    fn test_no_filters_selects_every_row() {
        let sql = filtered_pipelines(&ListPipelinesQuery::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "unexpected filter in: {}", sql);
    }

    #[test]
    fn test_set_filters_constrain_the_query() {
        use crate::models::CiTool;

        let query = ListPipelinesQuery {
            tool: Some(CiTool::Github),
            repository: Some("myapp".to_string()),
            ..Default::default()
        };
        let sql = filtered_pipelines(&query)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("WHERE"));
        assert!(sql.contains("github"));
        assert!(sql.contains("ILIKE"));
    }
}

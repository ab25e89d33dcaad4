//! Database queries for builds.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entity::build::{self, ActiveModel, Entity as Build};
use crate::error::{AppError, AppResult};
use crate::models::{BuildStatsResponse, CreateBuildRequest, ListBuildsQuery, RunStatus, UpdateBuildRequest};

use super::DbPool;

/// Fold per-build rows into the stats response.
pub fn fold_build_stats(rows: &[(String, Option<f64>)]) -> BuildStatsResponse {
    let mut stats = BuildStatsResponse::default();
    let mut duration_sum = 0.0;
    let mut duration_count = 0u64;

    for (status, duration) in rows {
        stats.total += 1;
        match RunStatus::parse(status) {
            Some(RunStatus::Success) => stats.success += 1,
            Some(RunStatus::Failure) => stats.failure += 1,
            Some(RunStatus::Running) => stats.running += 1,
            Some(RunStatus::Pending) => stats.pending += 1,
            Some(RunStatus::Cancelled) => stats.cancelled += 1,
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
fn filtered_builds(query: &ListBuildsQuery) -> Select<Build> {
    let mut select = Build::find();

    if let Some(status) = query.status {
        select = select.filter(build::Column::Status.eq(status.as_str()));
    }

    if let Some(ref stage) = query.stage {
        select = select.filter(build::Column::Stage.eq(stage.as_str()));
    }

    if let Some(ref pipeline_id) = query.pipeline_id {
        select = select.filter(build::Column::PipelineId.eq(pipeline_id.as_str()));
    }

    select
}

impl DbPool {
    /// Insert a new build.
    ///
    /// Fails with Conflict on a duplicate business key and InvalidInput when
    /// the referenced pipeline does not exist.
    pub async fn insert_build(&self, req: &CreateBuildRequest) -> AppResult<build::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            build_id: Set(req.build_id.clone()),
            pipeline_id: Set(req.pipeline_id.clone()),
            status: Set(req.status.as_str().to_string()),
            stage: Set(req.stage.clone()),
            environment: Set(req.environment.clone()),
            branch: Set(req.branch.clone()),
            commit_sha: Set(req.commit_sha.clone()),
            commit_message: Set(req.commit_message.clone()),
            trigger_type: Set(req.trigger_type.as_str().to_string()),
            triggered_by: Set(req.triggered_by.clone()),
            started_at: Set(req.started_at),
            completed_at: Set(req.completed_at),
            duration_secs: Set(req.duration_secs),
            tests_total: Set(req.tests.total),
            tests_passed: Set(req.tests.passed),
            tests_failed: Set(req.tests.failed),
            tests_skipped: Set(req.tests.skipped),
            coverage: Set(req.coverage),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(self.connection()).await.map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("build '{}' already exists", req.build_id))
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => AppError::InvalidInput(
                format!("pipeline '{}' does not exist", req.pipeline_id),
            ),
            _ => AppError::Database(format!("Failed to insert build: {}", e)),
        })
    }

    /// Get a build by its business key.
    pub async fn get_build(&self, build_id: &str) -> AppResult<Option<build::Model>> {
        let result = Build::find()
            .filter(build::Column::BuildId.eq(build_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get build: {}", e)))?;

        Ok(result)
    }

    /// Apply a partial update to a build.
    pub async fn update_build(
        &self,
        build_id: &str,
        req: &UpdateBuildRequest,
    ) -> AppResult<build::Model> {
        let current = self
            .get_build(build_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Build {}", build_id)))?;

        let mut active: ActiveModel = current.into();

        if let Some(status) = req.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(ref stage) = req.stage {
            active.stage = Set(stage.clone());
        }
        if let Some(completed_at) = req.completed_at {
            active.completed_at = Set(Some(completed_at));
        }
        if let Some(duration) = req.duration_secs {
            active.duration_secs = Set(Some(duration));
        }
        if let Some(tests) = req.tests {
            active.tests_total = Set(tests.total);
            active.tests_passed = Set(tests.passed);
            active.tests_failed = Set(tests.failed);
            active.tests_skipped = Set(tests.skipped);
        }
        if let Some(coverage) = req.coverage {
            active.coverage = Set(Some(coverage));
        }
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update build: {}", e)))?;

        Ok(result)
    }

    /// Delete a build by business key. Returns whether a row was removed.
    pub async fn delete_build(&self, build_id: &str) -> AppResult<bool> {
        let result = Build::delete_many()
            .filter(build::Column::BuildId.eq(build_id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete build: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// List builds with optional filtering, newest first.
    pub async fn list_builds(
        &self,
        query: &ListBuildsQuery,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<build::Model>, u64)> {
        let select = filtered_builds(query);

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count builds: {}", e)))?;

        let builds = select
            .order_by_desc(build::Column::StartedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list builds: {}", e)))?;

        Ok((builds, total))
    }

    /// Per-status build counts with average duration, optionally scoped to
    /// one pipeline.
    pub async fn build_stats(&self, pipeline_id: Option<&str>) -> AppResult<BuildStatsResponse> {
        let mut select = Build::find();

        if let Some(pipeline_id) = pipeline_id {
            select = select.filter(build::Column::PipelineId.eq(pipeline_id));
        }

        let rows: Vec<(String, Option<f64>)> = select
            .select_only()
            .column(build::Column::Status)
            .column(build::Column::DurationSecs)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load build stats: {}", e)))?;

        Ok(fold_build_stats(&rows))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    #[test]
    fn test_fold_counts_all_five_statuses() {
        let rows = vec![
            ("success".to_string(), Some(300.0)),
            ("success".to_string(), Some(310.0)),
            ("failure".to_string(), Some(720.0)),
            ("running".to_string(), None),
            ("pending".to_string(), None),
            ("cancelled".to_string(), None),
        ];
        let stats = fold_build_stats(&rows);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.failure, 1);
        assert_eq!(stats.running, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.cancelled, 1);
        // Average over the three completed builds only
        assert!((stats.avg_duration_secs - 443.333).abs() < 0.001);
    }

    #[test]
    fn test_fold_no_durations_yields_zero_average() {
        let rows = vec![("running".to_string(), None)];
        let stats = fold_build_stats(&rows);
        assert_eq!(stats.avg_duration_secs, 0.0);
    }

    #[test]
    fn test_no_filters_selects_every_row() {
        let sql = filtered_builds(&ListBuildsQuery::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains("WHERE"), "unexpected filter in: {}", sql);
    }

    #[test]
    fn test_set_filters_constrain_the_query() {
        let query = ListBuildsQuery {
            status: Some(RunStatus::Failure),
            pipeline_id: Some("pipeline-1".to_string()),
            ..Default::default()
        };
        let sql = filtered_builds(&query)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains("WHERE"));
        assert!(sql.contains("failure"));
        assert!(sql.contains("pipeline-1"));
    }
}

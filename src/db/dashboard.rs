//! Dashboard summary queries.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entity::pipeline::{self, Entity as Pipeline};
use crate::error::{AppError, AppResult};
use crate::models::pipeline::{RunStatus, TriggerType};
use crate::models::{BuildStatsResponse, DashboardSummaryResponse, RecentPipeline};

use super::DbPool;

/// Number of recent pipelines shown on the dashboard.
const RECENT_PIPELINE_LIMIT: u64 = 5;

/// Success and failure percentages over completed builds.
///
/// Running, pending and cancelled builds do not count toward either rate;
/// with no completed builds both rates are 0.
pub fn completion_rates(stats: &BuildStatsResponse) -> (f64, f64) {
    let completed = stats.success + stats.failure;
    if completed == 0 {
        return (0.0, 0.0);
    }
    let success = stats.success as f64 / completed as f64 * 100.0;
    (success, 100.0 - success)
}

impl DbPool {
    /// Collect the card metrics and recent pipelines for the dashboard page.
    pub async fn dashboard_summary(&self) -> AppResult<DashboardSummaryResponse> {
        let conn = self.connection();

        let total_pipelines = Pipeline::find()
            .count(conn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count pipelines: {}", e)))?;

        let running_pipelines = Pipeline::find()
            .filter(pipeline::Column::LastStatus.eq(RunStatus::Running.as_str()))
            .count(conn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count pipelines: {}", e)))?;

        let pending_pipelines = Pipeline::find()
            .filter(pipeline::Column::LastStatus.eq(RunStatus::Pending.as_str()))
            .count(conn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count pipelines: {}", e)))?;

        let build_stats = self.build_stats(None).await?;
        let (success_rate, failure_rate) = completion_rates(&build_stats);

        let alert_count = self.count_open_alerts().await?;
        let config_changes = self.count_recent_config_changes().await?;

        let recent = Pipeline::find()
            .filter(pipeline::Column::StartedAt.is_not_null())
            .order_by_desc(pipeline::Column::StartedAt)
            .limit(RECENT_PIPELINE_LIMIT)
            .all(conn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list recent pipelines: {}", e)))?;

        let recent_pipelines = recent
            .into_iter()
            .map(|p| RecentPipeline {
                id: p.id,
                pipeline_id: p.pipeline_id,
                name: p.name,
                status: p.last_status.as_deref().and_then(RunStatus::parse),
                repository: p.repository,
                branch: p.branch,
                started_at: p.started_at,
                duration_secs: p.average_duration_secs,
                trigger_type: TriggerType::parse(&p.trigger_type).unwrap_or(TriggerType::Manual),
            })
            .collect();

        Ok(DashboardSummaryResponse {
            total_pipelines,
            running_pipelines,
            pending_pipelines,
            total_builds: build_stats.total,
            success_rate,
            failure_rate,
            average_build_time_secs: build_stats.avg_duration_secs,
            alert_count,
            config_changes,
            recent_pipelines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_ignore_incomplete_builds() {
        let stats = BuildStatsResponse {
            total: 10,
            success: 6,
            failure: 2,
            running: 1,
            pending: 1,
            cancelled: 0,
            avg_duration_secs: 300.0,
        };
        let (success, failure) = completion_rates(&stats);
        assert!((success - 75.0).abs() < f64::EPSILON);
        assert!((failure - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_are_zero_without_completed_builds() {
        let stats = BuildStatsResponse {
            total: 3,
            running: 2,
            pending: 1,
            ..Default::default()
        };
        assert_eq!(completion_rates(&stats), (0.0, 0.0));
    }
}

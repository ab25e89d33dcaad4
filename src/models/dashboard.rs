//! Dashboard summary models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::pipeline::{RunStatus, TriggerType};

/// A recent pipeline run shown on the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentPipeline {
    pub id: Uuid,
    pub pipeline_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
    pub repository: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub trigger_type: TriggerType,
}

/// Card metrics for the dashboard page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummaryResponse {
    pub total_pipelines: u64,
    pub running_pipelines: u64,
    pub pending_pipelines: u64,
    pub total_builds: u64,
    /// Percentage of completed builds that succeeded, 0 when no builds completed.
    pub success_rate: f64,
    pub failure_rate: f64,
    pub average_build_time_secs: f64,
    /// Active, unacknowledged alerts.
    pub alert_count: u64,
    /// Configuration records modified in the last 24 hours.
    pub config_changes: u64,
    /// Most recently started pipelines.
    pub recent_pipelines: Vec<RecentPipeline>,
}

//! Build domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::pipeline::{RunStatus, TriggerType};
use super::{Pagination, PaginationParams};

/// Build status is the run outcome enum shared with pipelines.
pub type BuildStatus = RunStatus;

/// Test counts recorded for a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TestCounts {
    pub total: i32,
    pub passed: i32,
    pub failed: i32,
    pub skipped: i32,
}

/// Request to create a build.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBuildRequest {
    /// Business key, unique across all builds (e.g. "build-1").
    pub build_id: String,
    /// Business key of the pipeline this build executed.
    pub pipeline_id: String,
    pub status: BuildStatus,
    pub stage: String,
    pub environment: String,
    pub branch: String,
    pub commit_sha: String,
    #[serde(default)]
    pub commit_message: Option<String>,
    pub trigger_type: TriggerType,
    pub triggered_by: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
    #[serde(default)]
    pub tests: TestCounts,
    #[serde(default)]
    pub coverage: Option<f64>,
}

/// Request to update a build. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBuildRequest {
    pub status: Option<BuildStatus>,
    pub stage: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_secs: Option<f64>,
    pub tests: Option<TestCounts>,
    pub coverage: Option<f64>,
}

/// Build representation returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BuildResponse {
    pub id: Uuid,
    pub build_id: String,
    pub pipeline_id: String,
    pub status: BuildStatus,
    pub stage: String,
    pub environment: String,
    pub branch: String,
    pub commit_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    pub trigger_type: TriggerType,
    pub triggered_by: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub tests: TestCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Build list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BuildListResponse {
    pub builds: Vec<BuildResponse>,
    pub pagination: Pagination,
}

/// Query parameters for listing builds.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListBuildsQuery {
    /// Filter by run status.
    #[serde(default)]
    pub status: Option<BuildStatus>,
    /// Filter by stage (exact match, e.g. "deploy").
    #[serde(default)]
    pub stage: Option<String>,
    /// Filter by owning pipeline's business key.
    #[serde(default)]
    pub pipeline_id: Option<String>,
    /// Maximum results to return.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl ListBuildsQuery {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Per-status build counts with average duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BuildStatsResponse {
    pub total: u64,
    pub success: u64,
    pub failure: u64,
    pub running: u64,
    pub pending: u64,
    pub cancelled: u64,
    /// Mean duration over completed builds.
    pub avg_duration_secs: f64,
}

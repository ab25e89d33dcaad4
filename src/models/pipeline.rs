//! Pipeline domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Pagination, PaginationParams};

/// CI tool a pipeline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CiTool {
    Github,
    Gitlab,
    Jenkins,
}

impl CiTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Jenkins => "jenkins",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "github" => Some(Self::Github),
            "gitlab" => Some(Self::Gitlab),
            "jenkins" => Some(Self::Jenkins),
            _ => None,
        }
    }
}

impl std::fmt::Display for CiTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline definition status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Active,
    Inactive,
    Draft,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a single pipeline or build run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
    Running,
    Pending,
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Running => "running",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "running" => Some(Self::Running),
            "pending" => Some(Self::Pending),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kicked off a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Push,
    Pr,
    Manual,
    Schedule,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pr => "pr",
            Self::Manual => "manual",
            Self::Schedule => "schedule",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "push" => Some(Self::Push),
            "pr" => Some(Self::Pr),
            "manual" => Some(Self::Manual),
            "schedule" => Some(Self::Schedule),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to create a pipeline.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePipelineRequest {
    /// Business key, unique across all pipelines (e.g. "pipeline-1").
    pub pipeline_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub repository: String,
    pub branch: String,
    pub tool: CiTool,
    pub status: PipelineStatus,
    pub trigger_type: TriggerType,
    pub environment: String,
}

/// Request to update a pipeline. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePipelineRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub repository: Option<String>,
    pub branch: Option<String>,
    pub status: Option<PipelineStatus>,
    pub trigger_type: Option<TriggerType>,
    pub environment: Option<String>,
    pub last_status: Option<RunStatus>,
    pub started_at: Option<DateTime<Utc>>,
    pub average_duration_secs: Option<f64>,
    pub success_rate: Option<f64>,
    pub total_runs: Option<i32>,
}

/// Pipeline representation returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PipelineResponse {
    pub id: Uuid,
    pub pipeline_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub repository: String,
    pub branch: String,
    pub tool: CiTool,
    pub status: PipelineStatus,
    pub trigger_type: TriggerType,
    pub environment: String,
    /// Last run outcome, if the pipeline has ever run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<RunStatus>,
    /// When the most recent run started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_duration_secs: Option<f64>,
    pub success_rate: f64,
    pub total_runs: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PipelineListResponse {
    pub pipelines: Vec<PipelineResponse>,
    pub pagination: Pagination,
}

/// Query parameters for listing pipelines.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListPipelinesQuery {
    /// Filter by CI tool.
    #[serde(default)]
    pub tool: Option<CiTool>,
    /// Filter by pipeline status.
    #[serde(default)]
    pub status: Option<PipelineStatus>,
    /// Case-insensitive substring match on repository.
    #[serde(default)]
    pub repository: Option<String>,
    /// Maximum results to return.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl ListPipelinesQuery {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Per-status pipeline counts with average run duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct PipelineStatsResponse {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub draft: u64,
    /// Mean of average_duration_secs over pipelines that have run.
    pub avg_duration_secs: f64,
}

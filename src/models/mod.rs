//! Domain models for the CI/CD dashboard.

use utoipa::ToSchema;

pub mod alert;
pub mod build;
pub mod configuration;
pub mod dashboard;
pub mod metric;
pub mod pipeline;

// Re-export commonly used types
pub use alert::{
    AcknowledgeAlertRequest, AlertKind, AlertListResponse, AlertResponse, AlertSeverity,
    AlertSource, AlertStatus, CreateAlertRequest, ListAlertsQuery,
};
pub use build::{
    BuildListResponse, BuildResponse, BuildStatsResponse, BuildStatus, CreateBuildRequest,
    ListBuildsQuery, TestCounts, UpdateBuildRequest,
};
pub use configuration::{
    ConfigurationListResponse, ConfigurationResponse, CreateConfigurationRequest,
    ListConfigurationsQuery, UpdateConfigurationRequest,
};
pub use dashboard::{DashboardSummaryResponse, RecentPipeline};
pub use metric::{
    ListMetricsQuery, MetricListResponse, MetricResponse, MetricsSummaryResponse, TrendPoint,
    UpsertMetricRequest,
};
pub use pipeline::{
    CiTool, CreatePipelineRequest, ListPipelinesQuery, PipelineListResponse, PipelineResponse,
    PipelineStatsResponse, PipelineStatus, RunStatus, TriggerType, UpdatePipelineRequest,
};

/// Pagination parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, serde::Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Maximum results to return.
    pub limit: Option<u64>,
    /// Offset for pagination.
    pub offset: Option<u64>,
}

impl PaginationParams {
    /// Resolve the limit against server defaults, clamped to the maximum.
    pub fn clamped_limit(&self, default: u64, max: u64) -> u64 {
        self.limit.unwrap_or(default).clamp(1, max)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, ToSchema)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Create pagination metadata.
    pub fn new(limit: u64, offset: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

        Pagination {
            limit,
            offset,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling_of_total_over_limit() {
        assert_eq!(Pagination::new(10, 0, 25).total_pages, 3);
        assert_eq!(Pagination::new(10, 0, 30).total_pages, 3);
        assert_eq!(Pagination::new(10, 0, 31).total_pages, 4);
        assert_eq!(Pagination::new(10, 0, 0).total_pages, 0);
    }

    #[test]
    fn test_last_page_holds_remainder_items() {
        // 25 items at page size 10: pages of 10, 10, 5
        let p = Pagination::new(10, 0, 25);
        let last_page_items = p.total - (p.total_pages - 1) * p.limit;
        assert_eq!(last_page_items, 5);

        // 30 items at page size 10: last page holds a full page
        let p = Pagination::new(10, 0, 30);
        let last_page_items = p.total - (p.total_pages - 1) * p.limit;
        assert_eq!(last_page_items, 10);
    }

    #[test]
    fn test_clamped_limit_respects_bounds() {
        let params = PaginationParams {
            limit: Some(500),
            offset: None,
        };
        assert_eq!(params.clamped_limit(50, 100), 100);

        let params = PaginationParams::default();
        assert_eq!(params.clamped_limit(50, 100), 50);
        assert_eq!(params.offset(), 0);
    }
}

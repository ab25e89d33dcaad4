//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CI/CD Dashboard Server",
        version = "0.1.0",
        description = "API server backing the CI/CD observability dashboard: pipelines, builds, daily metrics, alerts and configuration records"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Pipeline endpoints
        api::pipelines::create_pipeline,
        api::pipelines::list_pipelines,
        api::pipelines::get_pipeline,
        api::pipelines::update_pipeline,
        api::pipelines::delete_pipeline,
        api::pipelines::pipeline_stats,
        // Build endpoints
        api::builds::create_build,
        api::builds::list_builds,
        api::builds::get_build,
        api::builds::update_build,
        api::builds::delete_build,
        api::builds::build_stats,
        // Metric endpoints
        api::metrics::list_metrics,
        api::metrics::upsert_metric,
        api::metrics::metrics_summary,
        // Alert endpoints
        api::alerts::create_alert,
        api::alerts::list_alerts,
        api::alerts::get_alert,
        api::alerts::acknowledge_alert,
        api::alerts::resolve_alert,
        // Configuration endpoints
        api::configurations::create_configuration,
        api::configurations::list_configurations,
        api::configurations::get_configuration,
        api::configurations::update_configuration,
        api::configurations::delete_configuration,
        // Dashboard endpoint
        api::dashboard::dashboard_summary,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Pagination,
            models::PaginationParams,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Pipelines
            models::CiTool,
            models::PipelineStatus,
            models::RunStatus,
            models::TriggerType,
            models::CreatePipelineRequest,
            models::UpdatePipelineRequest,
            models::PipelineResponse,
            models::PipelineListResponse,
            models::PipelineStatsResponse,
            // Builds
            models::TestCounts,
            models::CreateBuildRequest,
            models::UpdateBuildRequest,
            models::BuildResponse,
            models::BuildListResponse,
            models::BuildStatsResponse,
            api::builds::BuildStatsQuery,
            // Metrics
            models::UpsertMetricRequest,
            models::MetricResponse,
            models::MetricListResponse,
            models::TrendPoint,
            models::MetricsSummaryResponse,
            // Alerts
            models::AlertKind,
            models::AlertSeverity,
            models::AlertSource,
            models::AlertStatus,
            models::CreateAlertRequest,
            models::AcknowledgeAlertRequest,
            models::AlertResponse,
            models::AlertListResponse,
            // Configurations
            models::CreateConfigurationRequest,
            models::UpdateConfigurationRequest,
            models::ConfigurationResponse,
            models::ConfigurationListResponse,
            // Dashboard
            models::RecentPipeline,
            models::DashboardSummaryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health and readiness"),
        (name = "Pipelines", description = "Pipeline definitions and stats"),
        (name = "Builds", description = "Build runs and stats"),
        (name = "Metrics", description = "Daily metric snapshots and range summaries"),
        (name = "Alerts", description = "Alert lifecycle"),
        (name = "Configurations", description = "Configuration records"),
        (name = "Dashboard", description = "Dashboard summary"),
    )
)]
pub struct ApiDoc;

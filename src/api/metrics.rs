//! Metric snapshot API handlers.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use tracing::info;

use crate::db::DbPool;
use crate::entity::metric;
use crate::error::{AppError, AppResult};
use crate::models::{
    CiTool, ListMetricsQuery, MetricListResponse, MetricResponse, MetricsSummaryResponse,
    UpsertMetricRequest,
};

/// Map a metric row to its API representation.
fn to_response(m: metric::Model) -> MetricResponse {
    MetricResponse {
        id: m.id,
        date: m.date,
        tool: CiTool::parse(&m.tool).unwrap_or(CiTool::Github),
        total_pipelines: m.total_pipelines,
        total_builds: m.total_builds,
        success_rate: m.success_rate,
        failure_rate: m.failure_rate,
        average_build_time_secs: m.average_build_time_secs,
        average_pipeline_time_secs: m.average_pipeline_time_secs,
        deployments: m.deployments,
        deployment_success_rate: m.deployment_success_rate,
        code_coverage: m.code_coverage,
        test_pass_rate: m.test_pass_rate,
    }
}

fn validate_rate(name: &str, value: f64) -> AppResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(AppError::InvalidInput(format!(
            "{} must be between 0 and 100, got {}",
            name, value
        )));
    }
    Ok(())
}

/// List metric snapshots, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/metrics",
    tag = "Metrics",
    params(
        ("tool" = Option<CiTool>, Query, description = "Filter by CI tool"),
        ("from" = Option<NaiveDate>, Query, description = "Inclusive start date"),
        ("to" = Option<NaiveDate>, Query, description = "Inclusive end date"),
    ),
    responses(
        (status = 200, description = "Metric list", body = MetricListResponse),
    )
)]
pub async fn list_metrics(
    pool: web::Data<DbPool>,
    query: web::Query<ListMetricsQuery>,
) -> AppResult<HttpResponse> {
    let metrics = pool.list_metrics(&query).await?;

    let response = MetricListResponse {
        total: metrics.len() as u64,
        metrics: metrics.into_iter().map(to_response).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Insert or replace the daily snapshot for a `(date, tool)` pair.
#[utoipa::path(
    put,
    path = "/api/v1/metrics/{date}/{tool}",
    tag = "Metrics",
    params(
        ("date" = NaiveDate, Path, description = "Snapshot date (YYYY-MM-DD)"),
        ("tool" = CiTool, Path, description = "CI tool"),
    ),
    request_body = UpsertMetricRequest,
    responses(
        (status = 200, description = "Snapshot stored", body = MetricResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn upsert_metric(
    pool: web::Data<DbPool>,
    path: web::Path<(NaiveDate, CiTool)>,
    body: web::Json<UpsertMetricRequest>,
) -> AppResult<HttpResponse> {
    let (date, tool) = path.into_inner();
    let req = body.into_inner();

    validate_rate("success_rate", req.success_rate)?;
    validate_rate("failure_rate", req.failure_rate)?;
    validate_rate("deployment_success_rate", req.deployment_success_rate)?;
    validate_rate("code_coverage", req.code_coverage)?;
    validate_rate("test_pass_rate", req.test_pass_rate)?;

    let model = pool.upsert_metric(date, tool, &req).await?;

    info!("Metric snapshot stored: date={}, tool={}", date, tool);

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Aggregate snapshots over a date range for the metrics page.
///
/// Returns 404 when no snapshots match the range, so clients can tell
/// "no data" apart from a zeroed summary.
#[utoipa::path(
    get,
    path = "/api/v1/metrics/summary",
    tag = "Metrics",
    params(
        ("tool" = Option<CiTool>, Query, description = "Filter by CI tool"),
        ("from" = Option<NaiveDate>, Query, description = "Inclusive start date"),
        ("to" = Option<NaiveDate>, Query, description = "Inclusive end date"),
    ),
    responses(
        (status = 200, description = "Range summary", body = MetricsSummaryResponse),
        (status = 404, description = "No snapshots in range", body = crate::error::ErrorResponse),
    )
)]
pub async fn metrics_summary(
    pool: web::Data<DbPool>,
    query: web::Query<ListMetricsQuery>,
) -> AppResult<HttpResponse> {
    let metrics = pool.list_metrics(&query).await?;
    let snapshots: Vec<MetricResponse> = metrics.into_iter().map(to_response).collect();

    let summary = MetricsSummaryResponse::from_snapshots(&snapshots)
        .ok_or_else(|| AppError::NotFound("No metric snapshots in range".to_string()))?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Configure metric routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metrics/summary").route(web::get().to(metrics_summary)))
        .service(web::resource("/metrics").route(web::get().to(list_metrics)))
        .service(web::resource("/metrics/{date}/{tool}").route(web::put().to(upsert_metric)));
}

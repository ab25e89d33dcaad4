//! Pipeline API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::config::Config;
use crate::db::DbPool;
use crate::entity::pipeline;
use crate::error::{AppError, AppResult};
use crate::models::{
    CiTool, CreatePipelineRequest, ListPipelinesQuery, Pagination, PipelineListResponse,
    PipelineResponse, PipelineStatus, RunStatus, TriggerType, UpdatePipelineRequest,
};

/// Map a pipeline row to its API representation.
///
/// Enum columns are guarded by CHECK constraints, so the fallbacks here are
/// never expected to fire.
fn to_response(m: pipeline::Model) -> PipelineResponse {
    PipelineResponse {
        id: m.id,
        pipeline_id: m.pipeline_id,
        name: m.name,
        description: m.description,
        repository: m.repository,
        branch: m.branch,
        tool: CiTool::parse(&m.tool).unwrap_or(CiTool::Github),
        status: PipelineStatus::parse(&m.status).unwrap_or(PipelineStatus::Active),
        trigger_type: TriggerType::parse(&m.trigger_type).unwrap_or(TriggerType::Manual),
        environment: m.environment,
        last_status: m.last_status.as_deref().and_then(RunStatus::parse),
        started_at: m.started_at,
        average_duration_secs: m.average_duration_secs,
        success_rate: m.success_rate,
        total_runs: m.total_runs,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Register a new pipeline.
#[utoipa::path(
    post,
    path = "/api/v1/pipelines",
    tag = "Pipelines",
    request_body = CreatePipelineRequest,
    responses(
        (status = 201, description = "Pipeline created", body = PipelineResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Pipeline already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_pipeline(
    pool: web::Data<DbPool>,
    body: web::Json<CreatePipelineRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.pipeline_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "pipeline_id must not be empty".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }

    let model = pool.insert_pipeline(&req).await?;

    info!(
        "Pipeline created: pipeline_id={}, tool={}",
        model.pipeline_id, model.tool
    );

    Ok(HttpResponse::Created().json(to_response(model)))
}

/// List pipelines with optional filters.
///
/// Without filters the full set is returned, paginated.
#[utoipa::path(
    get,
    path = "/api/v1/pipelines",
    tag = "Pipelines",
    params(
        ("tool" = Option<CiTool>, Query, description = "Filter by CI tool"),
        ("status" = Option<PipelineStatus>, Query, description = "Filter by pipeline status"),
        ("repository" = Option<String>, Query, description = "Substring match on repository"),
        ("limit" = Option<u64>, Query, description = "Maximum results to return"),
        ("offset" = Option<u64>, Query, description = "Offset for pagination"),
    ),
    responses(
        (status = 200, description = "Pipeline list", body = PipelineListResponse),
    )
)]
pub async fn list_pipelines(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<ListPipelinesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = query.page();
    let limit = page.clamped_limit(config.default_page_size, config.max_page_size);
    let offset = page.offset();

    let (pipelines, total) = pool.list_pipelines(&query, limit, offset).await?;

    let response = PipelineListResponse {
        pipelines: pipelines.into_iter().map(to_response).collect(),
        pagination: Pagination::new(limit, offset, total),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get a pipeline by its business key.
#[utoipa::path(
    get,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    params(
        ("pipeline_id" = String, Path, description = "Pipeline business key")
    ),
    responses(
        (status = 200, description = "Pipeline detail", body = PipelineResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_pipeline(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let pipeline_id = path.into_inner();

    let model = pool
        .get_pipeline(&pipeline_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pipeline {}", pipeline_id)))?;

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Update a pipeline. Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    params(
        ("pipeline_id" = String, Path, description = "Pipeline business key")
    ),
    request_body = UpdatePipelineRequest,
    responses(
        (status = 200, description = "Pipeline updated", body = PipelineResponse),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_pipeline(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<UpdatePipelineRequest>,
) -> AppResult<HttpResponse> {
    let pipeline_id = path.into_inner();
    let req = body.into_inner();

    let model = pool.update_pipeline(&pipeline_id, &req).await?;

    info!("Pipeline updated: pipeline_id={}", pipeline_id);

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Delete a pipeline and its builds.
#[utoipa::path(
    delete,
    path = "/api/v1/pipelines/{pipeline_id}",
    tag = "Pipelines",
    params(
        ("pipeline_id" = String, Path, description = "Pipeline business key")
    ),
    responses(
        (status = 204, description = "Pipeline deleted"),
        (status = 404, description = "Pipeline not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_pipeline(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let pipeline_id = path.into_inner();

    let deleted = pool.delete_pipeline(&pipeline_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Pipeline {}", pipeline_id)));
    }

    info!("Pipeline deleted: pipeline_id={}", pipeline_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Per-status pipeline counts.
#[utoipa::path(
    get,
    path = "/api/v1/pipelines/stats",
    tag = "Pipelines",
    responses(
        (status = 200, description = "Pipeline stats", body = crate::models::PipelineStatsResponse),
    )
)]
pub async fn pipeline_stats(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = pool.pipeline_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Configure pipeline routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // "stats" must be registered before the catch-all business key segment
    cfg.service(web::resource("/pipelines/stats").route(web::get().to(pipeline_stats)))
        .service(
            web::resource("/pipelines")
                .route(web::get().to(list_pipelines))
                .route(web::post().to(create_pipeline)),
        )
        .service(
            web::resource("/pipelines/{pipeline_id}")
                .route(web::get().to(get_pipeline))
                .route(web::put().to(update_pipeline))
                .route(web::delete().to(delete_pipeline)),
        );
}

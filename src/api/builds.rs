//! Build API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::config::Config;
use crate::db::DbPool;
use crate::entity::build;
use crate::error::{AppError, AppResult};
use crate::models::{
    BuildListResponse, BuildResponse, BuildStatus, CreateBuildRequest, ListBuildsQuery, Pagination,
    TestCounts, TriggerType, UpdateBuildRequest,
};

/// Map a build row to its API representation.
fn to_response(m: build::Model) -> BuildResponse {
    BuildResponse {
        id: m.id,
        build_id: m.build_id,
        pipeline_id: m.pipeline_id,
        status: BuildStatus::parse(&m.status).unwrap_or(BuildStatus::Pending),
        stage: m.stage,
        environment: m.environment,
        branch: m.branch,
        commit_sha: m.commit_sha,
        commit_message: m.commit_message,
        trigger_type: TriggerType::parse(&m.trigger_type).unwrap_or(TriggerType::Manual),
        triggered_by: m.triggered_by,
        started_at: m.started_at,
        completed_at: m.completed_at,
        duration_secs: m.duration_secs,
        tests: TestCounts {
            total: m.tests_total,
            passed: m.tests_passed,
            failed: m.tests_failed,
            skipped: m.tests_skipped,
        },
        coverage: m.coverage,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Record a new build.
///
/// The referenced pipeline must already exist.
#[utoipa::path(
    post,
    path = "/api/v1/builds",
    tag = "Builds",
    request_body = CreateBuildRequest,
    responses(
        (status = 201, description = "Build created", body = BuildResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Build already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_build(
    pool: web::Data<DbPool>,
    body: web::Json<CreateBuildRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.build_id.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "build_id must not be empty".to_string(),
        ));
    }

    // Reject the reference up front for a clearer message than the FK error
    if pool.get_pipeline(&req.pipeline_id).await?.is_none() {
        return Err(AppError::InvalidInput(format!(
            "pipeline '{}' does not exist",
            req.pipeline_id
        )));
    }

    let model = pool.insert_build(&req).await?;

    info!(
        "Build created: build_id={}, pipeline_id={}, status={}",
        model.build_id, model.pipeline_id, model.status
    );

    Ok(HttpResponse::Created().json(to_response(model)))
}

/// List builds with optional filters, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/builds",
    tag = "Builds",
    params(
        ("status" = Option<BuildStatus>, Query, description = "Filter by run status"),
        ("stage" = Option<String>, Query, description = "Filter by stage"),
        ("pipeline_id" = Option<String>, Query, description = "Filter by owning pipeline"),
        ("limit" = Option<u64>, Query, description = "Maximum results to return"),
        ("offset" = Option<u64>, Query, description = "Offset for pagination"),
    ),
    responses(
        (status = 200, description = "Build list", body = BuildListResponse),
    )
)]
pub async fn list_builds(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<ListBuildsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = query.page();
    let limit = page.clamped_limit(config.default_page_size, config.max_page_size);
    let offset = page.offset();

    let (builds, total) = pool.list_builds(&query, limit, offset).await?;

    let response = BuildListResponse {
        builds: builds.into_iter().map(to_response).collect(),
        pagination: Pagination::new(limit, offset, total),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get a build by its business key.
#[utoipa::path(
    get,
    path = "/api/v1/builds/{build_id}",
    tag = "Builds",
    params(
        ("build_id" = String, Path, description = "Build business key")
    ),
    responses(
        (status = 200, description = "Build detail", body = BuildResponse),
        (status = 404, description = "Build not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_build(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let build_id = path.into_inner();

    let model = pool
        .get_build(&build_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Build {}", build_id)))?;

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Update a build. Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/builds/{build_id}",
    tag = "Builds",
    params(
        ("build_id" = String, Path, description = "Build business key")
    ),
    request_body = UpdateBuildRequest,
    responses(
        (status = 200, description = "Build updated", body = BuildResponse),
        (status = 404, description = "Build not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_build(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<UpdateBuildRequest>,
) -> AppResult<HttpResponse> {
    let build_id = path.into_inner();
    let req = body.into_inner();

    let model = pool.update_build(&build_id, &req).await?;

    info!("Build updated: build_id={}, status={}", build_id, model.status);

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Delete a build.
#[utoipa::path(
    delete,
    path = "/api/v1/builds/{build_id}",
    tag = "Builds",
    params(
        ("build_id" = String, Path, description = "Build business key")
    ),
    responses(
        (status = 204, description = "Build deleted"),
        (status = 404, description = "Build not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_build(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let build_id = path.into_inner();

    let deleted = pool.delete_build(&build_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Build {}", build_id)));
    }

    info!("Build deleted: build_id={}", build_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Per-status build counts, optionally scoped to one pipeline.
#[utoipa::path(
    get,
    path = "/api/v1/builds/stats",
    tag = "Builds",
    params(
        ("pipeline_id" = Option<String>, Query, description = "Scope stats to one pipeline")
    ),
    responses(
        (status = 200, description = "Build stats", body = crate::models::BuildStatsResponse),
    )
)]
pub async fn build_stats(
    pool: web::Data<DbPool>,
    query: web::Query<BuildStatsQuery>,
) -> AppResult<HttpResponse> {
    let stats = pool.build_stats(query.pipeline_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Query parameters for build stats.
#[derive(Debug, Clone, Default, serde::Deserialize, utoipa::ToSchema)]
pub struct BuildStatsQuery {
    #[serde(default)]
    pub pipeline_id: Option<String>,
}

/// Configure build routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // "stats" must be registered before the catch-all business key segment
    cfg.service(web::resource("/builds/stats").route(web::get().to(build_stats)))
        .service(
            web::resource("/builds")
                .route(web::get().to(list_builds))
                .route(web::post().to(create_build)),
        )
        .service(
            web::resource("/builds/{build_id}")
                .route(web::get().to(get_build))
                .route(web::put().to(update_build))
                .route(web::delete().to(delete_build)),
        );
}

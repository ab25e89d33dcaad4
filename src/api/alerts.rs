//! Alert API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::db::DbPool;
use crate::entity::alert;
use crate::error::{AppError, AppResult};
use crate::models::{
    AcknowledgeAlertRequest, AlertKind, AlertListResponse, AlertResponse, AlertSeverity,
    AlertSource, AlertStatus, CreateAlertRequest, ListAlertsQuery, Pagination,
};

/// Map an alert row to its API representation.
fn to_response(m: alert::Model) -> AlertResponse {
    AlertResponse {
        id: m.id,
        kind: AlertKind::parse(&m.kind).unwrap_or(AlertKind::Info),
        severity: AlertSeverity::parse(&m.severity).unwrap_or(AlertSeverity::Low),
        message: m.message,
        description: m.description,
        source: AlertSource::parse(&m.source).unwrap_or(AlertSource::System),
        source_id: m.source_id,
        source_name: m.source_name,
        environment: m.environment,
        tags: serde_json::from_value(m.tags).unwrap_or_default(),
        status: AlertStatus::parse(&m.status).unwrap_or(AlertStatus::Active),
        acknowledged: m.acknowledged,
        acknowledged_by: m.acknowledged_by,
        acknowledged_at: m.acknowledged_at,
        created_at: m.created_at,
    }
}

/// Raise a new alert.
///
/// New alerts start active and unacknowledged.
#[utoipa::path(
    post,
    path = "/api/v1/alerts",
    tag = "Alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert created", body = AlertResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_alert(
    pool: web::Data<DbPool>,
    body: web::Json<CreateAlertRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.message.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "message must not be empty".to_string(),
        ));
    }

    let model = pool.insert_alert(&req).await?;

    info!(
        "Alert created: id={}, severity={}, source={}",
        model.id, model.severity, model.source
    );

    Ok(HttpResponse::Created().json(to_response(model)))
}

/// List alerts with optional filters, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    tag = "Alerts",
    params(
        ("status" = Option<AlertStatus>, Query, description = "Filter by lifecycle status"),
        ("severity" = Option<AlertSeverity>, Query, description = "Filter by severity"),
        ("source" = Option<AlertSource>, Query, description = "Filter by source kind"),
        ("limit" = Option<u64>, Query, description = "Maximum results to return"),
        ("offset" = Option<u64>, Query, description = "Offset for pagination"),
    ),
    responses(
        (status = 200, description = "Alert list", body = AlertListResponse),
    )
)]
pub async fn list_alerts(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<ListAlertsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = query.page();
    let limit = page.clamped_limit(config.default_page_size, config.max_page_size);
    let offset = page.offset();

    let (alerts, total) = pool.list_alerts(&query, limit, offset).await?;

    let response = AlertListResponse {
        alerts: alerts.into_iter().map(to_response).collect(),
        pagination: Pagination::new(limit, offset, total),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get an alert by ID.
#[utoipa::path(
    get,
    path = "/api/v1/alerts/{alert_id}",
    tag = "Alerts",
    params(
        ("alert_id" = Uuid, Path, description = "Alert UUID")
    ),
    responses(
        (status = 200, description = "Alert detail", body = AlertResponse),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_alert(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let alert_id = path.into_inner();

    let model = pool
        .get_alert(alert_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Alert {}", alert_id)))?;

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Acknowledge an alert.
///
/// Idempotent: re-acknowledging keeps the original actor and timestamp.
#[utoipa::path(
    post,
    path = "/api/v1/alerts/{alert_id}/acknowledge",
    tag = "Alerts",
    params(
        ("alert_id" = Uuid, Path, description = "Alert UUID")
    ),
    request_body = AcknowledgeAlertRequest,
    responses(
        (status = 200, description = "Alert acknowledged", body = AlertResponse),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn acknowledge_alert(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<AcknowledgeAlertRequest>,
) -> AppResult<HttpResponse> {
    let alert_id = path.into_inner();
    let req = body.into_inner();

    if req.acknowledged_by.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "acknowledged_by must not be empty".to_string(),
        ));
    }

    let model = pool.acknowledge_alert(alert_id, &req.acknowledged_by).await?;

    info!(
        "Alert acknowledged: id={}, by={}",
        alert_id, req.acknowledged_by
    );

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Resolve an alert. Acknowledgement state is left untouched.
#[utoipa::path(
    post,
    path = "/api/v1/alerts/{alert_id}/resolve",
    tag = "Alerts",
    params(
        ("alert_id" = Uuid, Path, description = "Alert UUID")
    ),
    responses(
        (status = 200, description = "Alert resolved", body = AlertResponse),
        (status = 404, description = "Alert not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn resolve_alert(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let alert_id = path.into_inner();

    let model = pool.resolve_alert(alert_id).await?;

    info!("Alert resolved: id={}", alert_id);

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Configure alert routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/alerts")
            .route(web::get().to(list_alerts))
            .route(web::post().to(create_alert)),
    )
    .service(web::resource("/alerts/{alert_id}").route(web::get().to(get_alert)))
    .service(
        web::resource("/alerts/{alert_id}/acknowledge").route(web::post().to(acknowledge_alert)),
    )
    .service(web::resource("/alerts/{alert_id}/resolve").route(web::post().to(resolve_alert)));
}

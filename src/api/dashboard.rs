//! Dashboard summary endpoint.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::DashboardSummaryResponse;

/// Card metrics and recent pipelines for the dashboard page.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummaryResponse),
    )
)]
pub async fn dashboard_summary(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let summary = pool.dashboard_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard/summary").route(web::get().to(dashboard_summary)));
}

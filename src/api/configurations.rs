//! Configuration record API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entity::configuration;
use crate::error::{AppError, AppResult};
use crate::models::{
    ConfigurationListResponse, ConfigurationResponse, CreateConfigurationRequest,
    ListConfigurationsQuery, UpdateConfigurationRequest,
};

/// Map a configuration row to its API representation.
fn to_response(m: configuration::Model) -> ConfigurationResponse {
    ConfigurationResponse {
        id: m.id,
        name: m.name,
        config_type: m.config_type,
        category: m.category,
        description: m.description,
        status: m.status,
        environment: m.environment,
        modified_by: m.modified_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Create a configuration record.
#[utoipa::path(
    post,
    path = "/api/v1/configurations",
    tag = "Configurations",
    request_body = CreateConfigurationRequest,
    responses(
        (status = 201, description = "Configuration created", body = ConfigurationResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Configuration already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_configuration(
    pool: web::Data<DbPool>,
    body: web::Json<CreateConfigurationRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }

    let model = pool.insert_configuration(&req).await?;

    info!(
        "Configuration created: name={}, environment={}",
        model.name, model.environment
    );

    Ok(HttpResponse::Created().json(to_response(model)))
}

/// List configuration records, most recently modified first.
#[utoipa::path(
    get,
    path = "/api/v1/configurations",
    tag = "Configurations",
    params(
        ("config_type" = Option<String>, Query, description = "Filter by type"),
        ("environment" = Option<String>, Query, description = "Filter by environment"),
    ),
    responses(
        (status = 200, description = "Configuration list", body = ConfigurationListResponse),
    )
)]
pub async fn list_configurations(
    pool: web::Data<DbPool>,
    query: web::Query<ListConfigurationsQuery>,
) -> AppResult<HttpResponse> {
    let (configurations, total) = pool.list_configurations(&query).await?;

    let response = ConfigurationListResponse {
        configurations: configurations.into_iter().map(to_response).collect(),
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get a configuration record by ID.
#[utoipa::path(
    get,
    path = "/api/v1/configurations/{config_id}",
    tag = "Configurations",
    params(
        ("config_id" = Uuid, Path, description = "Configuration UUID")
    ),
    responses(
        (status = 200, description = "Configuration detail", body = ConfigurationResponse),
        (status = 404, description = "Configuration not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_configuration(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let config_id = path.into_inner();

    let model = pool
        .get_configuration(config_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Configuration {}", config_id)))?;

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Update a configuration record. Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/configurations/{config_id}",
    tag = "Configurations",
    params(
        ("config_id" = Uuid, Path, description = "Configuration UUID")
    ),
    request_body = UpdateConfigurationRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ConfigurationResponse),
        (status = 404, description = "Configuration not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_configuration(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateConfigurationRequest>,
) -> AppResult<HttpResponse> {
    let config_id = path.into_inner();
    let req = body.into_inner();

    let model = pool.update_configuration(config_id, &req).await?;

    info!("Configuration updated: id={}, name={}", config_id, model.name);

    Ok(HttpResponse::Ok().json(to_response(model)))
}

/// Delete a configuration record.
#[utoipa::path(
    delete,
    path = "/api/v1/configurations/{config_id}",
    tag = "Configurations",
    params(
        ("config_id" = Uuid, Path, description = "Configuration UUID")
    ),
    responses(
        (status = 204, description = "Configuration deleted"),
        (status = 404, description = "Configuration not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_configuration(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let config_id = path.into_inner();

    let deleted = pool.delete_configuration(config_id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Configuration {}", config_id)));
    }

    info!("Configuration deleted: id={}", config_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Configure configuration record routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/configurations")
            .route(web::get().to(list_configurations))
            .route(web::post().to(create_configuration)),
    )
    .service(
        web::resource("/configurations/{config_id}")
            .route(web::get().to(get_configuration))
            .route(web::put().to(update_configuration))
            .route(web::delete().to(delete_configuration)),
    );
}

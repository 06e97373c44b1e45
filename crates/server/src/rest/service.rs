use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, Role, ServiceRequest, ServiceResponse};

use crate::auth::extractors::{require_any, AuthRequired, ProviderRequired, RoleRequired};
use crate::error_convert::ValidateRequest;
use crate::rest::admin_log::audit;

// ---------------------------------------------------------------------------
// GET /api/services
// ---------------------------------------------------------------------------

/// List every service listing. Category and location filtering happen
/// client-side.
#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "All services", body = Vec<ServiceResponse>)
    ),
    tag = "services"
)]
pub async fn list_services(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = crate::repo::service::list_all(&pool).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/services/provider/{provider_id}
// ---------------------------------------------------------------------------

/// List a provider's service listings.
#[utoipa::path(
    get,
    path = "/api/services/provider/{provider_id}",
    params(("provider_id" = i64, Path, description = "Provider user id")),
    responses(
        (status = 200, description = "Provider services", body = Vec<ServiceResponse>)
    ),
    tag = "services"
)]
pub async fn list_by_provider(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(provider_id): Path<i64>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = crate::repo::service::list_by_provider(&pool, provider_id).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/services/{id}
// ---------------------------------------------------------------------------

/// Get a single service listing.
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service found", body = ServiceResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "services"
)]
pub async fn get_service(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = crate::repo::service::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;
    Ok(Json(ServiceResponse::from(service)))
}

// ---------------------------------------------------------------------------
// POST /api/services
// ---------------------------------------------------------------------------

/// Create a service listing. Providers only, and only for themselves.
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = ServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 403, description = "Provider role required", body = AppError),
        (status = 422, description = "Invalid request", body = AppError)
    ),
    tag = "services"
)]
pub async fn create_service(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): ProviderRequired,
    Json(mut body): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    body.validate_request()?;

    // Listings always belong to the authenticated provider.
    body.provider_id = claims.sub;

    let service = crate::repo::service::create(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

// ---------------------------------------------------------------------------
// PUT /api/services/{id}
// ---------------------------------------------------------------------------

/// Update a service listing. The owning provider only.
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    request_body = ServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ServiceResponse),
        (status = 403, description = "Not the owner", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "services"
)]
pub async fn update_service(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): ProviderRequired,
    Path(id): Path<i64>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    body.validate_request()?;

    let existing = crate::repo::service::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;
    if existing.provider_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let service = crate::repo::service::update(&pool, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;
    Ok(Json(ServiceResponse::from(service)))
}

// ---------------------------------------------------------------------------
// DELETE /api/services/{id}
// ---------------------------------------------------------------------------

/// Delete a service listing. The owning provider, or an admin.
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 403, description = "Not the owner", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "services"
)]
pub async fn delete_service(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let role = require_any(&claims, &[Role::Provider, Role::Admin])?;

    let existing = crate::repo::service::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;
    if role == Role::Provider && existing.provider_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let deleted = crate::repo::service::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Service {id} not found")));
    }

    if role == Role::Admin {
        audit(&pool, claims.sub, "Deleted service", Some(id), Some("SERVICE")).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

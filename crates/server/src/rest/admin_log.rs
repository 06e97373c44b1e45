use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::{Pool, Postgres};

use shared_types::{AdminLogResponse, AppError, CreateAdminLogRequest};

use crate::auth::extractors::{AdminRequired, RoleRequired};
use crate::error_convert::ValidateRequest;

/// Best-effort audit write. A failed audit insert must not fail the action
/// it records.
pub(crate) async fn audit(
    pool: &Pool<Postgres>,
    admin_id: i64,
    action: &str,
    target_id: Option<i64>,
    target_type: Option<&str>,
) {
    if let Err(err) =
        crate::repo::admin_log::create(pool, admin_id, action, target_id, target_type).await
    {
        tracing::warn!(admin_id, action, "failed to record audit entry: {err}");
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct RecentLogParams {
    /// Maximum number of entries to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

// ---------------------------------------------------------------------------
// POST /api/admin-logs
// ---------------------------------------------------------------------------

/// Record an audit entry manually. `admin_id` always comes from the session.
#[utoipa::path(
    post,
    path = "/api/admin-logs",
    request_body = CreateAdminLogRequest,
    responses(
        (status = 201, description = "Entry recorded", body = AdminLogResponse),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn create_log(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Json(body): Json<CreateAdminLogRequest>,
) -> Result<(StatusCode, Json<AdminLogResponse>), AppError> {
    body.validate_request()?;

    let log = crate::repo::admin_log::create(
        &pool,
        claims.sub,
        &body.action,
        body.target_id,
        body.target_type.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(AdminLogResponse::from(log))))
}

// ---------------------------------------------------------------------------
// GET /api/admin-logs
// ---------------------------------------------------------------------------

/// Full audit log. Reading the log is itself audited.
#[utoipa::path(
    get,
    path = "/api/admin-logs",
    responses(
        (status = 200, description = "Audit entries", body = Vec<AdminLogResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn list_logs(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
) -> Result<Json<Vec<AdminLogResponse>>, AppError> {
    let logs = crate::repo::admin_log::list_all(&pool).await?;
    audit(&pool, claims.sub, "Viewed admin logs", None, Some("ADMIN_LOG")).await;
    Ok(Json(logs.into_iter().map(AdminLogResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/admin-logs/recent?limit=N
// ---------------------------------------------------------------------------

/// Most recent audit entries.
#[utoipa::path(
    get,
    path = "/api/admin-logs/recent",
    params(RecentLogParams),
    responses(
        (status = 200, description = "Recent entries", body = Vec<AdminLogResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn list_recent(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Query(params): Query<RecentLogParams>,
) -> Result<Json<Vec<AdminLogResponse>>, AppError> {
    let limit = params.limit.clamp(1, 100);
    let logs = crate::repo::admin_log::list_recent(&pool, limit).await?;
    audit(&pool, claims.sub, "Viewed recent admin logs", None, Some("ADMIN_LOG")).await;
    Ok(Json(logs.into_iter().map(AdminLogResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/admin-logs/admin/{admin_id}
// ---------------------------------------------------------------------------

/// Audit entries recorded by one admin.
#[utoipa::path(
    get,
    path = "/api/admin-logs/admin/{admin_id}",
    params(("admin_id" = i64, Path, description = "Admin user id")),
    responses(
        (status = 200, description = "Entries", body = Vec<AdminLogResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn list_by_admin(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path(admin_id): Path<i64>,
) -> Result<Json<Vec<AdminLogResponse>>, AppError> {
    let logs = crate::repo::admin_log::list_by_admin(&pool, admin_id).await?;
    audit(
        &pool,
        claims.sub,
        "Viewed admin logs by admin",
        Some(admin_id),
        Some("ADMIN_LOG"),
    )
    .await;
    Ok(Json(logs.into_iter().map(AdminLogResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/admin-logs/{id}
// ---------------------------------------------------------------------------

/// Get a single audit entry.
#[utoipa::path(
    get,
    path = "/api/admin-logs/{id}",
    params(("id" = i64, Path, description = "Entry id")),
    responses(
        (status = 200, description = "Entry found", body = AdminLogResponse),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn get_log(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path(id): Path<i64>,
) -> Result<Json<AdminLogResponse>, AppError> {
    let log = crate::repo::admin_log::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Admin log {id} not found")))?;
    audit(&pool, claims.sub, "Viewed admin log entry", Some(id), Some("ADMIN_LOG")).await;
    Ok(Json(AdminLogResponse::from(log)))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin-logs/{id}
// ---------------------------------------------------------------------------

/// Delete an audit entry.
#[utoipa::path(
    delete,
    path = "/api/admin-logs/{id}",
    params(("id" = i64, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-logs"
)]
pub async fn delete_log(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = crate::repo::admin_log::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Admin log {id} not found")));
    }
    audit(&pool, claims.sub, "Deleted admin log entry", Some(id), Some("ADMIN_LOG")).await;
    Ok(StatusCode::NO_CONTENT)
}

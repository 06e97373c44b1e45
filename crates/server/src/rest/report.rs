use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CreateReportRequest, ReportCountResponse, ReportResponse, ReportTargetType, Role,
    UpdateReportRequest,
};

use crate::auth::extractors::{require_any, require_self_or_admin, AdminRequired, AuthRequired, RoleRequired};
use crate::error_convert::ValidateRequest;
use crate::rest::admin_log::audit;

fn parse_target_type(raw: &str) -> Result<ReportTargetType, AppError> {
    ReportTargetType::parse(raw).ok_or_else(|| {
        AppError::validation_field("target_type", format!("Unknown target type '{raw}'"))
    })
}

// ---------------------------------------------------------------------------
// POST /api/reports
// ---------------------------------------------------------------------------

/// File a report against a user, service, booking or review. The reporter
/// always comes from the session; a second report against the same target
/// by the same reporter is a conflict.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report filed", body = ReportResponse),
        (status = 409, description = "Already reported by this user", body = AppError),
        (status = 422, description = "Invalid request", body = AppError)
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Json(body): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    body.validate_request()?;
    let target_type = parse_target_type(&body.target_type)?;

    if crate::repo::report::exists_for(&pool, claims.sub, target_type.as_str(), body.target_id)
        .await?
    {
        return Err(AppError::conflict("You have already reported this target"));
    }

    let report = crate::repo::report::create(
        &pool,
        claims.sub,
        target_type.as_str(),
        body.target_id,
        body.reason.as_deref(),
    )
    .await?;

    if Role::parse(&claims.role) == Some(Role::Admin) {
        audit(&pool, claims.sub, "Filed report", Some(report.id), Some("REPORT")).await;
    }

    Ok((StatusCode::CREATED, Json(ReportResponse::from(report))))
}

// ---------------------------------------------------------------------------
// GET /api/reports
// ---------------------------------------------------------------------------

/// Every filed report. Reading the queue is itself audited.
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "All reports", body = Vec<ReportResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    let reports = crate::repo::report::list_all(&pool).await?;
    audit(&pool, claims.sub, "Viewed all reports", None, Some("REPORT")).await;
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reports/my-reports
// ---------------------------------------------------------------------------

/// Reports the calling customer or provider has filed.
#[utoipa::path(
    get,
    path = "/api/reports/my-reports",
    responses(
        (status = 200, description = "Own reports", body = Vec<ReportResponse>),
        (status = 403, description = "Customer or provider role required", body = AppError)
    ),
    tag = "reports"
)]
pub async fn my_reports(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    require_any(&claims, &[Role::Customer, Role::Provider])?;
    let reports = crate::repo::report::list_by_reporter(&pool, claims.sub).await?;
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reports/reporter/{reporter_id}
// ---------------------------------------------------------------------------

/// Reports filed by one user. The reporter themselves, or an admin.
#[utoipa::path(
    get,
    path = "/api/reports/reporter/{reporter_id}",
    params(("reporter_id" = i64, Path, description = "Reporting user id")),
    responses(
        (status = 200, description = "Reports by the user", body = Vec<ReportResponse>),
        (status = 403, description = "Access denied", body = AppError)
    ),
    tag = "reports"
)]
pub async fn list_by_reporter(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(reporter_id): Path<i64>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    require_self_or_admin(&claims, reporter_id)?;
    let reports = crate::repo::report::list_by_reporter(&pool, reporter_id).await?;
    if Role::parse(&claims.role) == Some(Role::Admin) {
        audit(
            &pool,
            claims.sub,
            "Viewed reports by reporter",
            Some(reporter_id),
            Some("REPORT"),
        )
        .await;
    }
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reports/target/{target_type}/{target_id}
// ---------------------------------------------------------------------------

/// Reports against one target.
#[utoipa::path(
    get,
    path = "/api/reports/target/{target_type}/{target_id}",
    params(
        ("target_type" = String, Path, description = "USER, SERVICE, BOOKING or REVIEW"),
        ("target_id" = i64, Path, description = "Target id")
    ),
    responses(
        (status = 200, description = "Reports against the target", body = Vec<ReportResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "reports"
)]
pub async fn list_by_target(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path((raw_type, target_id)): Path<(String, i64)>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    let target_type = parse_target_type(&raw_type)?;
    let reports =
        crate::repo::report::list_by_target(&pool, target_type.as_str(), target_id).await?;
    audit(
        &pool,
        claims.sub,
        "Viewed reports by target",
        Some(target_id),
        Some(target_type.as_str()),
    )
    .await;
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reports/target-type/{target_type}
// ---------------------------------------------------------------------------

/// Reports against every target of one kind.
#[utoipa::path(
    get,
    path = "/api/reports/target-type/{target_type}",
    params(("target_type" = String, Path, description = "USER, SERVICE, BOOKING or REVIEW")),
    responses(
        (status = 200, description = "Reports for the target type", body = Vec<ReportResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "reports"
)]
pub async fn list_by_target_type(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path(raw_type): Path<String>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    let target_type = parse_target_type(&raw_type)?;
    let reports = crate::repo::report::list_by_target_type(&pool, target_type.as_str()).await?;
    audit(
        &pool,
        claims.sub,
        "Viewed reports by target type",
        None,
        Some(target_type.as_str()),
    )
    .await;
    Ok(Json(reports.into_iter().map(ReportResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reports/count/target/{target_type}/{target_id}
// ---------------------------------------------------------------------------

/// How many reports a target has accumulated.
#[utoipa::path(
    get,
    path = "/api/reports/count/target/{target_type}/{target_id}",
    params(
        ("target_type" = String, Path, description = "USER, SERVICE, BOOKING or REVIEW"),
        ("target_id" = i64, Path, description = "Target id")
    ),
    responses(
        (status = 200, description = "Report count", body = ReportCountResponse),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "reports"
)]
pub async fn count_for_target(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path((raw_type, target_id)): Path<(String, i64)>,
) -> Result<Json<ReportCountResponse>, AppError> {
    let target_type = parse_target_type(&raw_type)?;
    let count =
        crate::repo::report::count_for_target(&pool, target_type.as_str(), target_id).await?;
    audit(
        &pool,
        claims.sub,
        "Counted reports for target",
        Some(target_id),
        Some(target_type.as_str()),
    )
    .await;
    Ok(Json(ReportCountResponse {
        target_type: target_type.as_str().to_string(),
        target_id,
        count,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/reports/{id}
// ---------------------------------------------------------------------------

/// Get a single report.
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report found", body = ReportResponse),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): AdminRequired,
    Path(id): Path<i64>,
) -> Result<Json<ReportResponse>, AppError> {
    let report = crate::repo::report::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))?;
    audit(&pool, claims.sub, "Viewed report", Some(id), Some("REPORT")).await;
    Ok(Json(ReportResponse::from(report)))
}

// ---------------------------------------------------------------------------
// PUT /api/reports/{id}
// ---------------------------------------------------------------------------

/// Revise a report's reason. The reporter, or an admin.
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report id")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Report updated", body = ReportResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reports"
)]
pub async fn update_report(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let existing = crate::repo::report::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))?;

    let is_admin = Role::parse(&claims.role) == Some(Role::Admin);
    if !is_admin && existing.reported_by != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let report = crate::repo::report::update_reason(&pool, id, body.reason.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))?;

    if is_admin {
        audit(&pool, claims.sub, "Updated report", Some(id), Some("REPORT")).await;
    }

    Ok(Json(ReportResponse::from(report)))
}

// ---------------------------------------------------------------------------
// DELETE /api/reports/{id}
// ---------------------------------------------------------------------------

/// Withdraw or dismiss a report. The reporter, or an admin.
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = crate::repo::report::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Report {id} not found")))?;

    let is_admin = Role::parse(&claims.role) == Some(Role::Admin);
    if !is_admin && existing.reported_by != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let deleted = crate::repo::report::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Report {id} not found")));
    }

    if is_admin {
        audit(&pool, claims.sub, "Deleted report", Some(id), Some("REPORT")).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

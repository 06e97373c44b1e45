use shared_types::{AppError, Report};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const REPORT_COLUMNS: &str = "id, target_type, target_id, reported_by, reason, created_at";

pub async fn create(
    pool: &Pool<Postgres>,
    reported_by: i64,
    target_type: &str,
    target_id: i64,
    reason: Option<&str>,
) -> Result<Report, AppError> {
    let row = sqlx::query_as::<_, Report>(
        "INSERT INTO reports (target_type, target_id, reported_by, reason)
         VALUES ($1, $2, $3, $4)
         RETURNING id, target_type, target_id, reported_by, reason, created_at",
    )
    .bind(target_type)
    .bind(target_id)
    .bind(reported_by)
    .bind(reason)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Report>, AppError> {
    let row = sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Report>, AppError> {
    let rows = sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_target(
    pool: &Pool<Postgres>,
    target_type: &str,
    target_id: i64,
) -> Result<Vec<Report>, AppError> {
    let rows = sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports
         WHERE target_type = $1 AND target_id = $2 ORDER BY created_at DESC"
    ))
    .bind(target_type)
    .bind(target_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_target_type(
    pool: &Pool<Postgres>,
    target_type: &str,
) -> Result<Vec<Report>, AppError> {
    let rows = sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE target_type = $1 ORDER BY created_at DESC"
    ))
    .bind(target_type)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_reporter(
    pool: &Pool<Postgres>,
    reported_by: i64,
) -> Result<Vec<Report>, AppError> {
    let rows = sqlx::query_as::<_, Report>(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports WHERE reported_by = $1 ORDER BY created_at DESC"
    ))
    .bind(reported_by)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

/// Whether this reporter already filed a report against this target.
pub async fn exists_for(
    pool: &Pool<Postgres>,
    reported_by: i64,
    target_type: &str,
    target_id: i64,
) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
             SELECT 1 FROM reports
             WHERE reported_by = $1 AND target_type = $2 AND target_id = $3
         )",
    )
    .bind(reported_by)
    .bind(target_type)
    .bind(target_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(exists)
}

pub async fn count_for_target(
    pool: &Pool<Postgres>,
    target_type: &str,
    target_id: i64,
) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reports WHERE target_type = $1 AND target_id = $2",
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(count)
}

pub async fn update_reason(
    pool: &Pool<Postgres>,
    id: i64,
    reason: Option<&str>,
) -> Result<Option<Report>, AppError> {
    let row = sqlx::query_as::<_, Report>(
        "UPDATE reports SET reason = $2 WHERE id = $1
         RETURNING id, target_type, target_id, reported_by, reason, created_at",
    )
    .bind(id)
    .bind(reason)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

use shared_types::{AdminLog, AppError};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const LOG_COLUMNS: &str = "id, admin_id, action, target_id, target_type, timestamp";

pub async fn create(
    pool: &Pool<Postgres>,
    admin_id: i64,
    action: &str,
    target_id: Option<i64>,
    target_type: Option<&str>,
) -> Result<AdminLog, AppError> {
    let row = sqlx::query_as::<_, AdminLog>(
        "INSERT INTO admin_logs (admin_id, action, target_id, target_type)
         VALUES ($1, $2, $3, $4)
         RETURNING id, admin_id, action, target_id, target_type, timestamp",
    )
    .bind(admin_id)
    .bind(action)
    .bind(target_id)
    .bind(target_type)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<AdminLog>, AppError> {
    let row = sqlx::query_as::<_, AdminLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM admin_logs WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM admin_logs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<AdminLog>, AppError> {
    let rows = sqlx::query_as::<_, AdminLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM admin_logs ORDER BY timestamp DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_recent(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<AdminLog>, AppError> {
    let rows = sqlx::query_as::<_, AdminLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM admin_logs ORDER BY timestamp DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_admin(
    pool: &Pool<Postgres>,
    admin_id: i64,
) -> Result<Vec<AdminLog>, AppError> {
    let rows = sqlx::query_as::<_, AdminLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM admin_logs WHERE admin_id = $1 ORDER BY timestamp DESC"
    ))
    .bind(admin_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

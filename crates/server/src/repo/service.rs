use shared_types::{AppError, Service, ServiceRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const SERVICE_COLUMNS: &str =
    "id, provider_id, category, subcategory, description, price, availability, location, created_at";

pub async fn create(pool: &Pool<Postgres>, req: &ServiceRequest) -> Result<Service, AppError> {
    let row = sqlx::query_as::<_, Service>(
        "INSERT INTO services (provider_id, category, subcategory, description, price, availability, location)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, provider_id, category, subcategory, description, price, availability, location, created_at",
    )
    .bind(req.provider_id)
    .bind(&req.category)
    .bind(&req.subcategory)
    .bind(&req.description)
    .bind(req.price)
    .bind(&req.availability)
    .bind(&req.location)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Service>, AppError> {
    let row = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Service>, AppError> {
    let rows = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_provider(
    pool: &Pool<Postgres>,
    provider_id: i64,
) -> Result<Vec<Service>, AppError> {
    let rows = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE provider_id = $1 ORDER BY created_at DESC"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: &ServiceRequest,
) -> Result<Option<Service>, AppError> {
    let row = sqlx::query_as::<_, Service>(
        "UPDATE services SET category = $2, subcategory = $3, description = $4,
             price = $5, availability = $6, location = $7
         WHERE id = $1
         RETURNING id, provider_id, category, subcategory, description, price, availability, location, created_at",
    )
    .bind(id)
    .bind(&req.category)
    .bind(&req.subcategory)
    .bind(&req.description)
    .bind(req.price)
    .bind(&req.availability)
    .bind(&req.location)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

use shared_types::{AppError, Review, ReviewRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const REVIEW_COLUMNS: &str =
    "id, booking_id, customer_id, provider_id, rating, comment, created_at";

pub async fn create(pool: &Pool<Postgres>, req: &ReviewRequest) -> Result<Review, AppError> {
    let row = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (booking_id, customer_id, provider_id, rating, comment)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, booking_id, customer_id, provider_id, rating, comment, created_at",
    )
    .bind(req.booking_id)
    .bind(req.customer_id)
    .bind(req.provider_id)
    .bind(req.rating)
    .bind(&req.comment)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Review>, AppError> {
    let row = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Review>, AppError> {
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_provider(
    pool: &Pool<Postgres>,
    provider_id: i64,
) -> Result<Vec<Review>, AppError> {
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE provider_id = $1 ORDER BY created_at DESC"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_customer(
    pool: &Pool<Postgres>,
    customer_id: i64,
) -> Result<Vec<Review>, AppError> {
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE customer_id = $1 ORDER BY created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_booking(
    pool: &Pool<Postgres>,
    booking_id: i64,
) -> Result<Vec<Review>, AppError> {
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE booking_id = $1 ORDER BY created_at DESC"
    ))
    .bind(booking_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: &ReviewRequest,
) -> Result<Option<Review>, AppError> {
    let row = sqlx::query_as::<_, Review>(
        "UPDATE reviews SET rating = $2, comment = $3 WHERE id = $1
         RETURNING id, booking_id, customer_id, provider_id, rating, comment, created_at",
    )
    .bind(id)
    .bind(req.rating)
    .bind(&req.comment)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Average rating across a provider's reviews. 0.0 when there are none.
pub async fn average_rating(pool: &Pool<Postgres>, provider_id: i64) -> Result<f64, AppError> {
    let avg: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE provider_id = $1",
    )
    .bind(provider_id)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(avg.unwrap_or(0.0))
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

use shared_types::{AppError, Booking, CreateBookingRequest, UpdateBookingRequest};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const BOOKING_COLUMNS: &str =
    "id, service_id, customer_id, provider_id, booking_date, time_slot, status, notes, created_at";

/// Insert a new booking. Status always starts at PENDING regardless of input.
pub async fn create(
    pool: &Pool<Postgres>,
    req: &CreateBookingRequest,
) -> Result<Booking, AppError> {
    let row = sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (service_id, customer_id, provider_id, booking_date, time_slot, status, notes)
         VALUES ($1, $2, $3, $4, $5, 'PENDING', $6)
         RETURNING id, service_id, customer_id, provider_id, booking_date, time_slot, status, notes, created_at",
    )
    .bind(req.service_id)
    .bind(req.customer_id)
    .bind(req.provider_id)
    .bind(req.booking_date)
    .bind(&req.time_slot)
    .bind(&req.notes)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Booking>, AppError> {
    let row = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Booking>, AppError> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_customer(
    pool: &Pool<Postgres>,
    customer_id: i64,
) -> Result<Vec<Booking>, AppError> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE customer_id = $1 ORDER BY created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_provider(
    pool: &Pool<Postgres>,
    provider_id: i64,
) -> Result<Vec<Booking>, AppError> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE provider_id = $1 ORDER BY created_at DESC"
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_by_service(
    pool: &Pool<Postgres>,
    service_id: i64,
) -> Result<Vec<Booking>, AppError> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE service_id = $1 ORDER BY created_at DESC"
    ))
    .bind(service_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

/// List bookings by canonical status string (caller normalizes casing).
pub async fn list_by_status(
    pool: &Pool<Postgres>,
    status: &str,
) -> Result<Vec<Booking>, AppError> {
    let rows = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = $1 ORDER BY created_at DESC"
    ))
    .bind(status)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: &UpdateBookingRequest,
    status: &str,
) -> Result<Option<Booking>, AppError> {
    let row = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET service_id = $2, customer_id = $3, provider_id = $4,
             booking_date = $5, time_slot = $6, status = $7, notes = $8
         WHERE id = $1
         RETURNING id, service_id, customer_id, provider_id, booking_date, time_slot, status, notes, created_at",
    )
    .bind(id)
    .bind(req.service_id)
    .bind(req.customer_id)
    .bind(req.provider_id)
    .bind(req.booking_date)
    .bind(&req.time_slot)
    .bind(status)
    .bind(&req.notes)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn update_status(
    pool: &Pool<Postgres>,
    id: i64,
    status: &str,
) -> Result<Option<Booking>, AppError> {
    let row = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $2 WHERE id = $1
         RETURNING id, service_id, customer_id, provider_id, booking_date, time_slot, status, notes, created_at",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

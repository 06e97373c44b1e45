use shared_types::{AppError, ProviderProfile, UpdateUserRequest, User};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, location, created_at";

/// Insert a new user. The caller hashes the password and normalizes the role.
pub async fn create(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
    location: Option<&str>,
) -> Result<User, AppError> {
    let row = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash, role, location)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, name, email, password_hash, role, location, created_at",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(location)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn find_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<User>, AppError> {
    let rows = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

pub async fn list_providers(pool: &Pool<Postgres>) -> Result<Vec<User>, AppError> {
    let rows = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE role = 'PROVIDER' ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}

/// Full update of the mutable user fields. Returns the updated row or None.
pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: &UpdateUserRequest,
) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, User>(
        "UPDATE users SET name = $2, email = $3, location = $4
         WHERE id = $1
         RETURNING id, name, email, password_hash, role, location, created_at",
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.location)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Delete a user. Returns true if a row was actually deleted.
pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Provider profiles
// ---------------------------------------------------------------------------

pub async fn find_profile(
    pool: &Pool<Postgres>,
    user_id: i64,
) -> Result<Option<ProviderProfile>, AppError> {
    let row = sqlx::query_as::<_, ProviderProfile>(
        "SELECT id, user_id, category, subcategory, skills, service_area
         FROM provider_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Create or replace the provider profile for a user.
pub async fn upsert_profile(
    pool: &Pool<Postgres>,
    user_id: i64,
    category: Option<&str>,
    subcategory: Option<&str>,
    skills: Option<&str>,
    service_area: Option<&str>,
) -> Result<ProviderProfile, AppError> {
    let row = sqlx::query_as::<_, ProviderProfile>(
        "INSERT INTO provider_profiles (user_id, category, subcategory, skills, service_area)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (user_id) DO UPDATE SET
             category = EXCLUDED.category,
             subcategory = EXCLUDED.subcategory,
             skills = EXCLUDED.skills,
             service_area = EXCLUDED.service_area
         RETURNING id, user_id, category, subcategory, skills, service_area",
    )
    .bind(user_id)
    .bind(category)
    .bind(subcategory)
    .bind(skills)
    .bind(service_area)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

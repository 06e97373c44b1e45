use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, Role, UpdateUserRequest, User, UserResponse};

use crate::auth::extractors::{require_self_or_admin, AdminRequired, AuthRequired, CustomerRequired, RoleRequired};
use crate::error_convert::ValidateRequest;
use crate::rest::admin_log::audit;

/// Flatten a user row with its provider profile (if any) into the wire shape.
async fn to_response(pool: &Pool<Postgres>, user: User) -> Result<UserResponse, AppError> {
    let profile = if Role::parse(&user.role) == Some(Role::Provider) {
        crate::repo::user::find_profile(pool, user.id).await?
    } else {
        None
    };
    Ok(UserResponse::from_parts(user, profile))
}

// ---------------------------------------------------------------------------
// GET /api/users/all
// ---------------------------------------------------------------------------

/// List every user. Admin only.
#[utoipa::path(
    get,
    path = "/api/users/all",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(_claims): AdminRequired,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = crate::repo::user::list_all(&pool).await?;
    let mut response = Vec::with_capacity(users.len());
    for user in users {
        response.push(to_response(&pool, user).await?);
    }
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/users/me
// ---------------------------------------------------------------------------

/// Profile of the authenticated user.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "users"
)]
pub async fn current_user(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<UserResponse>, AppError> {
    let user = crate::repo::user::find_by_id(&pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(to_response(&pool, user).await?))
}

// ---------------------------------------------------------------------------
// GET /api/users/providers
// ---------------------------------------------------------------------------

/// List provider users for customer browsing.
#[utoipa::path(
    get,
    path = "/api/users/providers",
    responses(
        (status = 200, description = "Providers", body = Vec<UserResponse>),
        (status = 403, description = "Customer role required", body = AppError)
    ),
    tag = "users"
)]
pub async fn list_providers(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(_claims): CustomerRequired,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = crate::repo::user::list_providers(&pool).await?;
    let mut response = Vec::with_capacity(users.len());
    for user in users {
        response.push(to_response(&pool, user).await?);
    }
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/users/id/{id}
// ---------------------------------------------------------------------------

/// Get a user by id. Non-admins may only read their own record.
#[utoipa::path(
    get,
    path = "/api/users/id/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    require_self_or_admin(&claims, id)?;

    let user = crate::repo::user::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
    Ok(Json(to_response(&pool, user).await?))
}

// ---------------------------------------------------------------------------
// GET /api/users/email/{email}
// ---------------------------------------------------------------------------

/// Get a user by email. Non-admins may only look up their own address.
#[utoipa::path(
    get,
    path = "/api/users/email/{email}",
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn get_user_by_email(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let is_admin = Role::parse(&claims.role) == Some(Role::Admin);
    if !is_admin && !claims.email.eq_ignore_ascii_case(&email) {
        return Err(AppError::forbidden("Access denied"));
    }

    let user = crate::repo::user::find_by_email(&pool, &email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(to_response(&pool, user).await?))
}

// ---------------------------------------------------------------------------
// PUT /api/users/{id}
// ---------------------------------------------------------------------------

/// Update a user record. Non-admins may only update their own.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn update_user(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    require_self_or_admin(&claims, id)?;
    body.validate_request()?;

    let user = crate::repo::user::update(&pool, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    // Provider-profile fields ride along on the same request.
    if Role::parse(&user.role) == Some(Role::Provider) {
        crate::repo::user::upsert_profile(
            &pool,
            user.id,
            body.category.as_deref(),
            body.subcategory.as_deref(),
            body.skills.as_deref(),
            body.service_area.as_deref(),
        )
        .await?;
    }

    if claims.sub != id {
        audit(&pool, claims.sub, "Updated user", Some(id), Some("USER")).await;
    }

    Ok(Json(to_response(&pool, user).await?))
}

// ---------------------------------------------------------------------------
// DELETE /api/users/{id}
// ---------------------------------------------------------------------------

/// Delete a user. Non-admins may only delete their own account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_self_or_admin(&claims, id)?;

    let deleted = crate::repo::user::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("User {id} not found")));
    }

    if claims.sub != id {
        audit(&pool, claims.sub, "Deleted user", Some(id), Some("USER")).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

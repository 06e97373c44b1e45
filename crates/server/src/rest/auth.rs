use axum::{extract::State, http::StatusCode, Json};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, Role, ServiceRequest,
};

use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// POST /api/auth/register
// ---------------------------------------------------------------------------

/// Register a new account. Provider registrations with a category also get
/// an initial service listing.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 409, description = "Email already exists", body = AppError),
        (status = 422, description = "Invalid request", body = AppError)
    ),
    tag = "auth"
)]
pub async fn register(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    body.validate_request()?;

    let role = Role::parse(&body.role)
        .ok_or_else(|| AppError::validation_field("role", "Unrecognized role"))?;

    let password_hash = hash_password(&body.password)?;

    let user = crate::repo::user::create(
        &pool,
        &body.name,
        &body.email,
        &password_hash,
        role.as_str(),
        body.location.as_deref(),
    )
    .await?;

    if role == Role::Provider {
        crate::repo::user::upsert_profile(
            &pool,
            user.id,
            body.category.as_deref(),
            body.subcategory.as_deref(),
            body.skills.as_deref(),
            body.service_area.as_deref(),
        )
        .await?;

        // A provider that registers with a category gets a starter listing.
        if let Some(category) = &body.category {
            let initial = ServiceRequest {
                provider_id: user.id,
                category: category.clone(),
                subcategory: body.subcategory.clone(),
                description: None,
                price: body.price.unwrap_or(0.0),
                availability: Some(
                    body.availability
                        .clone()
                        .unwrap_or_else(|| "Available".to_string()),
                ),
                location: body.location.clone(),
            };
            crate::repo::service::create(&pool, &initial).await?;
        }
    }

    tracing::info!(user_id = user.id, role = role.as_str(), "registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError)
    ),
    tag = "auth"
)]
pub async fn login(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate_request()?;

    let user = crate::repo::user::find_by_email(&pool, &body.email)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    // Stored roles are canonical uppercase; normalize anyway.
    let role = Role::parse(&user.role)
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    let token = create_token(user.id, &user.email, role.as_str())
        .map_err(|e| AppError::internal(format!("Token creation failed: {e}")))?;

    tracing::info!(user_id = user.id, "login");

    Ok(Json(AuthResponse {
        token,
        role: role.as_str().to_string(),
    }))
}

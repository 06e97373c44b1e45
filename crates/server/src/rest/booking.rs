use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, Booking, BookingResponse, BookingStatus, CreateBookingRequest, Role,
    UpdateBookingRequest, UpdateBookingStatusRequest,
};

use crate::auth::extractors::{require_any, require_self_or_admin, AdminRequired, AuthRequired, CustomerRequired, RoleRequired};
use crate::auth::jwt::Claims;
use crate::rest::admin_log::audit;

/// Participants of a booking are its customer and provider; admins see all.
fn require_participant(claims: &Claims, booking: &Booking) -> Result<Role, AppError> {
    let role = require_any(claims, &[Role::Customer, Role::Provider, Role::Admin])?;
    let is_participant = claims.sub == booking.customer_id || claims.sub == booking.provider_id;
    if role == Role::Admin || is_participant {
        Ok(role)
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}

fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    BookingStatus::parse(raw)
        .ok_or_else(|| AppError::validation_field("status", format!("Unknown status '{raw}'")))
}

// ---------------------------------------------------------------------------
// POST /api/bookings
// ---------------------------------------------------------------------------

/// Create a booking. Customers only; new bookings always start PENDING.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 403, description = "Customer role required", body = AppError),
        (status = 404, description = "Service not found", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): CustomerRequired,
    Json(mut body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    body.customer_id = claims.sub;

    // The provider comes from the service row, not the request body.
    let service = crate::repo::service::find_by_id(&pool, body.service_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Service {} not found", body.service_id))
        })?;
    body.provider_id = service.provider_id;

    let booking = crate::repo::booking::create(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

// ---------------------------------------------------------------------------
// GET /api/bookings
// ---------------------------------------------------------------------------

/// List every booking. Admin only.
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "All bookings", body = Vec<BookingResponse>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn list_bookings(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(_claims): AdminRequired,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = crate::repo::booking::list_all(&pool).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/bookings/customer/{customer_id}
// ---------------------------------------------------------------------------

/// Bookings placed by a customer. The customer themselves, or an admin.
#[utoipa::path(
    get,
    path = "/api/bookings/customer/{customer_id}",
    params(("customer_id" = i64, Path, description = "Customer user id")),
    responses(
        (status = 200, description = "Customer bookings", body = Vec<BookingResponse>),
        (status = 403, description = "Access denied", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn list_by_customer(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    require_self_or_admin(&claims, customer_id)?;
    let bookings = crate::repo::booking::list_by_customer(&pool, customer_id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/bookings/provider/{provider_id}
// ---------------------------------------------------------------------------

/// Bookings assigned to a provider. The provider themselves, or an admin.
#[utoipa::path(
    get,
    path = "/api/bookings/provider/{provider_id}",
    params(("provider_id" = i64, Path, description = "Provider user id")),
    responses(
        (status = 200, description = "Provider bookings", body = Vec<BookingResponse>),
        (status = 403, description = "Access denied", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn list_by_provider(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(provider_id): Path<i64>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    require_self_or_admin(&claims, provider_id)?;
    let bookings = crate::repo::booking::list_by_provider(&pool, provider_id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/bookings/service/{service_id}
// ---------------------------------------------------------------------------

/// Bookings for one service. The service's provider, or an admin.
#[utoipa::path(
    get,
    path = "/api/bookings/service/{service_id}",
    params(("service_id" = i64, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service bookings", body = Vec<BookingResponse>),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Service not found", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn list_by_service(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(service_id): Path<i64>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let role = require_any(&claims, &[Role::Provider, Role::Admin])?;

    let service = crate::repo::service::find_by_id(&pool, service_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {service_id} not found")))?;
    if role == Role::Provider && service.provider_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let bookings = crate::repo::booking::list_by_service(&pool, service_id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/bookings/status/{status}
// ---------------------------------------------------------------------------

/// Bookings in a given status. Admin only.
#[utoipa::path(
    get,
    path = "/api/bookings/status/{status}",
    params(("status" = String, Path, description = "Booking status")),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingResponse>),
        (status = 403, description = "Admin role required", body = AppError),
        (status = 422, description = "Unknown status", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn list_by_status(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(_claims): AdminRequired,
    Path(status): Path<String>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let status = parse_status(&status)?;
    let bookings = crate::repo::booking::list_by_status(&pool, status.as_str()).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/bookings/{id}
// ---------------------------------------------------------------------------

/// Get a booking. Participants and admins only.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = crate::repo::booking::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    require_participant(&claims, &booking)?;
    Ok(Json(BookingResponse::from(booking)))
}

// ---------------------------------------------------------------------------
// PUT /api/bookings/{id}
// ---------------------------------------------------------------------------

/// Full update of a booking. Participants and admins only.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn update_booking(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let existing = crate::repo::booking::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    require_participant(&claims, &existing)?;

    let status = parse_status(&body.status)?;
    let booking = crate::repo::booking::update(&pool, id, &body, status.as_str())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    Ok(Json(BookingResponse::from(booking)))
}

// ---------------------------------------------------------------------------
// PATCH /api/bookings/{id}/status
// ---------------------------------------------------------------------------

/// Change a booking's status. Providers drive the workflow; customers may
/// only cancel their own bookings.
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    params(("id" = i64, Path, description = "Booking id")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = BookingResponse),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Unknown status", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn update_booking_status(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let existing = crate::repo::booking::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    let role = require_participant(&claims, &existing)?;

    let status = parse_status(&body.status)?;
    if role == Role::Customer && status != BookingStatus::Cancelled {
        return Err(AppError::forbidden("Customers may only cancel bookings"));
    }

    let booking = crate::repo::booking::update_status(&pool, id, status.as_str())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
    Ok(Json(BookingResponse::from(booking)))
}

// ---------------------------------------------------------------------------
// DELETE /api/bookings/{id}
// ---------------------------------------------------------------------------

/// Delete a booking. The booking's customer, or an admin.
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = crate::repo::booking::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;

    let role = require_any(&claims, &[Role::Customer, Role::Admin])?;
    if role == Role::Customer && existing.customer_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let deleted = crate::repo::booking::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Booking {id} not found")));
    }

    if role == Role::Admin {
        audit(&pool, claims.sub, "Deleted booking", Some(id), Some("BOOKING")).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

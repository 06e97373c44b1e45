use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, AverageRatingResponse, ReviewRequest, ReviewResponse, Role};

use crate::auth::extractors::{require_any, require_self_or_admin, AuthRequired, CustomerRequired, RoleRequired};
use crate::error_convert::ValidateRequest;
use crate::rest::admin_log::audit;

// ---------------------------------------------------------------------------
// POST /api/reviews
// ---------------------------------------------------------------------------

/// Submit a review for a booking. Customers only; rating is 1..=5.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 403, description = "Customer role required", body = AppError),
        (status = 404, description = "Booking not found", body = AppError),
        (status = 422, description = "Invalid rating", body = AppError)
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): CustomerRequired,
    Json(mut body): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    body.validate_request()?;
    body.customer_id = claims.sub;

    // The booking anchors the review; provider comes from it.
    let booking = crate::repo::booking::find_by_id(&pool, body.booking_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Booking {} not found", body.booking_id))
        })?;
    if booking.customer_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }
    body.provider_id = booking.provider_id;

    let review = crate::repo::review::create(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

// ---------------------------------------------------------------------------
// GET /api/reviews
// ---------------------------------------------------------------------------

/// List every review.
#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "All reviews", body = Vec<ReviewResponse>)
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = crate::repo::review::list_all(&pool).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reviews/provider/{provider_id}
// ---------------------------------------------------------------------------

/// Reviews left for a provider.
#[utoipa::path(
    get,
    path = "/api/reviews/provider/{provider_id}",
    params(("provider_id" = i64, Path, description = "Provider user id")),
    responses(
        (status = 200, description = "Provider reviews", body = Vec<ReviewResponse>)
    ),
    tag = "reviews"
)]
pub async fn list_by_provider(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(provider_id): Path<i64>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = crate::repo::review::list_by_provider(&pool, provider_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reviews/provider/{provider_id}/average-rating
// ---------------------------------------------------------------------------

/// Average rating for a provider. 0.0 when the provider has no reviews.
#[utoipa::path(
    get,
    path = "/api/reviews/provider/{provider_id}/average-rating",
    params(("provider_id" = i64, Path, description = "Provider user id")),
    responses(
        (status = 200, description = "Average rating", body = AverageRatingResponse)
    ),
    tag = "reviews"
)]
pub async fn average_rating(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(provider_id): Path<i64>,
) -> Result<Json<AverageRatingResponse>, AppError> {
    let average_rating = crate::repo::review::average_rating(&pool, provider_id).await?;
    Ok(Json(AverageRatingResponse {
        provider_id,
        average_rating,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/reviews/customer/{customer_id}
// ---------------------------------------------------------------------------

/// Reviews written by a customer. The customer themselves, or an admin.
#[utoipa::path(
    get,
    path = "/api/reviews/customer/{customer_id}",
    params(("customer_id" = i64, Path, description = "Customer user id")),
    responses(
        (status = 200, description = "Customer reviews", body = Vec<ReviewResponse>),
        (status = 403, description = "Access denied", body = AppError)
    ),
    tag = "reviews"
)]
pub async fn list_by_customer(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    require_self_or_admin(&claims, customer_id)?;
    let reviews = crate::repo::review::list_by_customer(&pool, customer_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reviews/booking/{booking_id}
// ---------------------------------------------------------------------------

/// Reviews attached to one booking.
#[utoipa::path(
    get,
    path = "/api/reviews/booking/{booking_id}",
    params(("booking_id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking reviews", body = Vec<ReviewResponse>)
    ),
    tag = "reviews"
)]
pub async fn list_by_booking(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(booking_id): Path<i64>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = crate::repo::review::list_by_booking(&pool, booking_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/reviews/{id}
// ---------------------------------------------------------------------------

/// Get a single review.
#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(_claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = crate::repo::review::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))?;
    Ok(Json(ReviewResponse::from(review)))
}

// ---------------------------------------------------------------------------
// PUT /api/reviews/{id}
// ---------------------------------------------------------------------------

/// Update a review. The authoring customer only.
#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 403, description = "Not the author", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 422, description = "Invalid rating", body = AppError)
    ),
    tag = "reviews"
)]
pub async fn update_review(
    State(pool): State<Pool<Postgres>>,
    RoleRequired(claims): CustomerRequired,
    Path(id): Path<i64>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    body.validate_request()?;

    let existing = crate::repo::review::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))?;
    if existing.customer_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let review = crate::repo::review::update(&pool, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))?;
    Ok(Json(ReviewResponse::from(review)))
}

// ---------------------------------------------------------------------------
// DELETE /api/reviews/{id}
// ---------------------------------------------------------------------------

/// Delete a review. The authoring customer, or an admin.
#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Access denied", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let role = require_any(&claims, &[Role::Customer, Role::Admin])?;

    let existing = crate::repo::review::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {id} not found")))?;
    if role == Role::Customer && existing.customer_id != claims.sub {
        return Err(AppError::forbidden("Access denied"));
    }

    let deleted = crate::repo::review::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Review {id} not found")));
    }

    if role == Role::Admin {
        audit(&pool, claims.sub, "Deleted review", Some(id), Some("REVIEW")).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

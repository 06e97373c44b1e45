use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// A customer review of a completed booking. Rating is 1..=5.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub booking_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReviewResponse {
    pub id: i64,
    pub booking_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            booking_id: r.booking_id,
            customer_id: r.customer_id,
            provider_id: r.provider_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating or updating a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct ReviewRequest {
    pub booking_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))
    )]
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Average-rating response for a provider. 0.0 when the provider has no
/// reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AverageRatingResponse {
    pub provider_id: i64,
    pub average_rating: f64,
}

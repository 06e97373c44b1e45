use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// A booking of a service by a customer. Status transitions are
/// server-authoritative; see [`crate::BookingStatus`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub service_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub booking_date: NaiveDate,
    pub time_slot: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub id: i64,
    pub service_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    /// ISO date (YYYY-MM-DD).
    pub booking_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            service_id: b.service_id,
            customer_id: b.customer_id,
            provider_id: b.provider_id,
            booking_date: b.booking_date.to_string(),
            time_slot: b.time_slot,
            status: b.status,
            notes: b.notes,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating a booking. New bookings always start PENDING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBookingRequest {
    pub service_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for a full booking update (PUT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateBookingRequest {
    pub service_id: i64,
    pub customer_id: i64,
    pub provider_id: i64,
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub time_slot: Option<String>,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for PATCH /api/bookings/{id}/status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateBookingStatusRequest {
    /// One of PENDING / CONFIRMED / COMPLETED / CANCELLED (case-insensitive).
    pub status: String,
}

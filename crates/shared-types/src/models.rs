use serde::{Deserialize, Serialize};

/// Marketplace user role controlling dashboard and API access.
///
/// - `Customer` — browses providers/services, books, reviews.
/// - `Provider` — owns service listings and works bookings.
/// - `Admin` — full user management plus the audit log.
///
/// The wire and database representation is the exact uppercase string
/// (`CUSTOMER` / `PROVIDER` / `ADMIN`); parsing is case-insensitive so
/// legacy mixed-case values normalize at this boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    /// Case-insensitive parse. Unknown strings are rejected rather than
    /// defaulted — an unrecognized role must never reach a dashboard.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CUSTOMER" => Some(Role::Customer),
            "PROVIDER" => Some(Role::Provider),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Canonical uppercase string for the wire and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Provider => "PROVIDER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Lifecycle status of a booking. Transitions are server-authoritative;
/// clients only request them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "COMPLETED" => Some(BookingStatus::Completed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Kind of resource a report points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportTargetType {
    User,
    Service,
    Booking,
    Review,
}

impl ReportTargetType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Some(ReportTargetType::User),
            "SERVICE" => Some(ReportTargetType::Service),
            "BOOKING" => Some(ReportTargetType::Booking),
            "REVIEW" => Some(ReportTargetType::Review),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTargetType::User => "USER",
            ReportTargetType::Service => "SERVICE",
            ReportTargetType::Booking => "BOOKING",
            ReportTargetType::Review => "REVIEW",
        }
    }
}

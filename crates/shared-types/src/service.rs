use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// A service listing owned by a provider.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub provider_id: i64,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub availability: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a service listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceResponse {
    pub id: i64,
    pub provider_id: i64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: String,
}

impl From<Service> for ServiceResponse {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            provider_id: s.provider_id,
            category: s.category,
            subcategory: s.subcategory,
            description: s.description,
            price: s.price,
            availability: s.availability,
            location: s.location,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating or fully updating a service listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct ServiceRequest {
    pub provider_id: i64,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Category is required"))
    )]
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0.0, message = "Price must not be negative"))
    )]
    pub price: f64,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

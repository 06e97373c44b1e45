use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

/// A user row. `password_hash` never leaves the server — the wire type is
/// [`UserResponse`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Provider-only profile fields, stored in their own table and flattened
/// into [`UserResponse`] for provider users.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ProviderProfile {
    pub id: i64,
    pub user_id: i64,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub skills: Option<String>,
    pub service_area: Option<String>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a user. Provider fields are present only when the user
/// is a provider with a profile on record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
}

impl UserResponse {
    /// Flatten a user row and its optional provider profile.
    pub fn from_parts(user: User, profile: Option<ProviderProfile>) -> Self {
        let profile = profile.unwrap_or(ProviderProfile {
            id: 0,
            user_id: user.id,
            category: None,
            subcategory: None,
            skills: None,
            service_area: None,
        });
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            location: user.location,
            category: profile.category,
            subcategory: profile.subcategory,
            skills: profile.skills,
            service_area: profile.service_area,
        }
    }
}

/// Request body for updating a user. The caller sends the full draft;
/// provider-profile fields are ignored for non-providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdateUserRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub service_area: Option<String>,
}

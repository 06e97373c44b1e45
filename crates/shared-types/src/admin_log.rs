use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// An audit-log entry recording an admin action. Most entries are created
/// automatically by the server when an admin touches another resource.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AdminLog {
    pub id: i64,
    pub admin_id: i64,
    pub action: String,
    pub target_id: Option<i64>,
    pub target_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for an audit-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminLogResponse {
    pub id: i64,
    pub admin_id: i64,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    pub timestamp: String,
}

impl From<AdminLog> for AdminLogResponse {
    fn from(l: AdminLog) -> Self {
        Self {
            id: l.id,
            admin_id: l.admin_id,
            action: l.action,
            target_id: l.target_id,
            target_type: l.target_type,
            timestamp: l.timestamp.to_rfc3339(),
        }
    }
}

/// Request body for manually recording an audit-log entry. The server sets
/// `admin_id` from the authenticated session, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateAdminLogRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Action is required"))
    )]
    pub action: String,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub target_type: Option<String>,
}

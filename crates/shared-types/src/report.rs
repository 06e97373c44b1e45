use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain Struct
// ---------------------------------------------------------------------------

/// A user-submitted report flagging a target for admin attention. A
/// reporter may report a given target at most once.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Report {
    pub id: i64,
    pub target_type: String,
    pub target_id: i64,
    pub reported_by: i64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportResponse {
    pub id: i64,
    pub target_type: String,
    pub target_id: i64,
    pub reported_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<Report> for ReportResponse {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            target_type: r.target_type,
            target_id: r.target_id,
            reported_by: r.reported_by,
            reason: r.reason,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Request body for filing a report. The server sets the reporter from the
/// authenticated session, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct CreateReportRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Target type is required"))
    )]
    pub target_type: String,
    pub target_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for revising a report. Only the reason can change; the
/// target is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateReportRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Number of reports filed against one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportCountResponse {
    pub target_type: String,
    pub target_id: i64,
    pub count: i64,
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Instant;

static STARTED: OnceLock<Instant> = OnceLock::new();

/// Mark the moment the server came up. Call once from `main`.
pub fn mark_started() {
    STARTED.get_or_init(Instant::now);
}

/// Connectivity of the Postgres pool as seen by the liveness query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseHealth {
    Reachable,
    Unreachable,
}

/// Liveness payload for the marketplace API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthReport {
    pub service: String,
    pub database: DatabaseHealth,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Liveness endpoint. Answers 503 when Postgres is unreachable so a load
/// balancer can drain the instance.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Serving traffic", body = HealthReport),
        (status = 503, description = "Database unreachable", body = HealthReport)
    ),
    tag = "health"
)]
pub async fn health(State(pool): State<Pool<Postgres>>) -> (StatusCode, Json<HealthReport>) {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => DatabaseHealth::Reachable,
        Err(err) => {
            tracing::warn!("health check could not reach the database: {err}");
            DatabaseHealth::Unreachable
        }
    };

    let status = match database {
        DatabaseHealth::Reachable => StatusCode::OK,
        DatabaseHealth::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status,
        Json(HealthReport {
            service: "fixitnow-api".to_string(),
            database,
            uptime_seconds: STARTED.get().map(|t| t.elapsed().as_secs()).unwrap_or(0),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::infrastructure::database::entities::published_reservation;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

/// Liveness report
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

/// Result of counting the listings table
#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseHealth {
    pub status: ServiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Number of published reservations, when the count succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_reservations: Option<u64>,
}

async fn check_database(db: &DatabaseConnection) -> DatabaseHealth {
    let started = Instant::now();
    match published_reservation::Entity::find().count(db).await {
        Ok(count) => DatabaseHealth {
            status: ServiceStatus::Ok,
            latency_ms: Some(started.elapsed().as_millis() as u64),
            published_reservations: Some(count),
        },
        Err(e) => {
            warn!(error = %e, "Health check query failed");
            DatabaseHealth {
                status: ServiceStatus::Degraded,
                latency_ms: None,
                published_reservations: None,
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state.db).await;
    let status = database.status;
    let code = match status {
        ServiceStatus::Ok => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
        }),
    )
}

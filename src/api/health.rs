use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::controller::{AppState, DashboardState, RefreshPhase};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    dashboard: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    phase: RefreshPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_refresh: Option<DateTime<Utc>>,
}

impl ComponentHealth {
    /// A failed refresh degrades the service; it stays up and retryable.
    fn of(state: &DashboardState) -> Self {
        let status = match state.phase {
            RefreshPhase::Failed => "degraded",
            _ => "healthy",
        };
        Self {
            status: status.to_string(),
            phase: state.phase,
            last_refresh: state.updated_at,
        }
    }
}

/// GET /health - Health check endpoint
///
/// Always 200 while the process serves requests; the body reports whether the
/// last refresh cycle succeeded.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = ComponentHealth::of(&state.controller.snapshot().await);

    let response = HealthResponse {
        status: dashboard.status.clone(),
        timestamp: Utc::now(),
        checks: HealthChecks { dashboard },
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

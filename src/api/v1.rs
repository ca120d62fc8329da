use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Instant;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::{AppState, DashboardState},
    domain::{supply_curve, SeriesTotals, SupplyPoint, ESG_POLICIES, GRID_REDUCTION_TARGET_PERCENT},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/policies", get(get_policies))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// Dashboard snapshot plus the chart and reference data derived from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(flatten)]
    pub state: DashboardState,
    pub totals: SeriesTotals,
    pub supply: Vec<SupplyPoint>,
    pub esg_policies: &'static [&'static str],
    pub grid_reduction_target_percent: f64,
}

impl From<DashboardState> for DashboardView {
    fn from(state: DashboardState) -> Self {
        Self {
            totals: SeriesTotals::of(&state.series),
            supply: supply_curve(&state.series),
            esg_policies: &ESG_POLICIES,
            grid_reduction_target_percent: GRID_REDUCTION_TARGET_PERCENT,
            state,
        }
    }
}

pub async fn get_dashboard(State(st): State<AppState>) -> ApiResponse<DashboardView> {
    ApiResponse::success(DashboardView::from(st.controller.snapshot().await))
}

/// Manual "recalculate": blocks until the refresh cycle settles.
pub async fn refresh_dashboard(
    State(st): State<AppState>,
) -> Result<ApiResponse<DashboardView>, ApiError> {
    let started = Instant::now();
    let state = st.controller.refresh().await?;
    Ok(ApiResponse::success(DashboardView::from(state))
        .with_duration(started.elapsed().as_millis() as u64))
}

pub async fn get_policies() -> ApiResponse<[&'static str; 4]> {
    ApiResponse::success(ESG_POLICIES)
}

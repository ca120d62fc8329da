//! Dashboard refresh cycle.
//!
//! One [`DashboardController`] owns the displayed state. A refresh generates
//! a new series and runs the analysis and forecast requests concurrently.
//! Results are committed together or not at all: a failed cycle keeps the
//! last committed data and only flips the phase to `Failed`. Starting a new
//! refresh cancels the one in flight.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{AnalysisResult, ForecastRecord, HourlyRecord};
use crate::genai::{GeminiClient, GenerativeModel};
use crate::insights::{InsightError, InsightService};
use crate::simulation::CampusDataGenerator;

/// Message shown to users when a refresh fails, whatever the cause.
pub const REFRESH_FAILED_MESSAGE: &str =
    "Failed to generate AI insights. Please check your connection.";

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub controller: Arc<DashboardController>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let model = Arc::new(GeminiClient::new(&cfg.genai)?);
        Ok(Self::with_model(cfg, model))
    }

    pub fn with_model(cfg: Config, model: Arc<dyn GenerativeModel>) -> Self {
        let insights = InsightService::new(model, cfg.genai.request_timeout());
        let generator = CampusDataGenerator::new(&cfg.generator);
        Self {
            controller: Arc::new(DashboardController::new(insights, generator)),
            cfg,
        }
    }
}

/// Run the initial refresh in the background, as a page mount would.
pub fn spawn_initial_refresh(state: AppState) {
    let controller = state.controller.clone();
    tokio::spawn(async move {
        if let Err(e) = controller.refresh().await {
            warn!(error = %e, "initial refresh failed");
        }
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RefreshPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub phase: RefreshPhase,
    pub series: Vec<HourlyRecord>,
    pub analysis: Option<AnalysisResult>,
    pub forecast: Vec<ForecastRecord>,
    pub error: Option<String>,
    /// When the current analysis and forecast were committed
    pub updated_at: Option<DateTime<Utc>>,
}

impl DashboardState {
    fn initial(series: Vec<HourlyRecord>) -> Self {
        Self {
            phase: RefreshPhase::Idle,
            series,
            analysis: None,
            forecast: Vec::new(),
            error: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Insight(#[from] InsightError),

    #[error("refresh superseded by a newer request")]
    Superseded,

    #[error("refresh task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

struct InFlight {
    generation: u64,
    token: CancellationToken,
}

pub struct DashboardController {
    insights: InsightService,
    generator: Mutex<CampusDataGenerator>,
    state: RwLock<DashboardState>,
    in_flight: Mutex<InFlight>,
}

impl DashboardController {
    pub fn new(insights: InsightService, mut generator: CampusDataGenerator) -> Self {
        let series = generator.generate();
        Self {
            insights,
            generator: Mutex::new(generator),
            state: RwLock::new(DashboardState::initial(series)),
            in_flight: Mutex::new(InFlight {
                generation: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Regenerate the series and fetch fresh insights for it.
    ///
    /// Returns the committed state on success. On failure the previous data
    /// stays in place with phase `Failed`; a refresh overtaken by a newer one
    /// returns [`RefreshError::Superseded`] and leaves the state untouched.
    ///
    /// The cycle runs on its own task, so dropping the returned future does
    /// not leave the dashboard stuck in `Loading`.
    pub async fn refresh(self: &Arc<Self>) -> Result<DashboardState, RefreshError> {
        let (generation, token) = self.begin();
        let span = info_span!("refresh", refresh_id = %Uuid::new_v4(), generation);

        let controller = Arc::clone(self);
        tokio::spawn(controller.run_cycle(generation, token).instrument(span)).await?
    }

    async fn run_cycle(
        self: Arc<Self>,
        generation: u64,
        token: CancellationToken,
    ) -> Result<DashboardState, RefreshError> {
        {
            let mut st = self.state.write().await;
            if !self.is_current(generation) {
                debug!("refresh superseded before it started");
                return Err(RefreshError::Superseded);
            }
            st.phase = RefreshPhase::Loading;
            st.error = None;
        }

        let series = {
            let mut generator = self.generator.lock();
            generator.generate()
        };
        debug!("generated new energy series");

        let outcome = tokio::select! {
            _ = token.cancelled() => {
                debug!("refresh cancelled before insights arrived");
                return Err(RefreshError::Superseded);
            }
            r = async {
                tokio::try_join!(self.insights.analyze(&series), self.insights.forecast(&series))
            } => r,
        };

        let mut st = self.state.write().await;
        if !self.is_current(generation) {
            debug!("discarding results of superseded refresh");
            return Err(RefreshError::Superseded);
        }

        match outcome {
            Ok((analysis, forecast)) => {
                *st = DashboardState {
                    phase: RefreshPhase::Ready,
                    series,
                    analysis: Some(analysis),
                    forecast,
                    error: None,
                    updated_at: Some(Utc::now()),
                };
                info!("refresh complete");
                Ok(st.clone())
            }
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping previous data");
                st.phase = RefreshPhase::Failed;
                st.error = Some(REFRESH_FAILED_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }

    /// Claim the next generation and cancel whatever was in flight.
    fn begin(&self) -> (u64, CancellationToken) {
        let mut in_flight = self.in_flight.lock();
        in_flight.token.cancel();
        in_flight.generation += 1;
        in_flight.token = CancellationToken::new();
        (in_flight.generation, in_flight.token.clone())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight.lock().generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::genai::{GenAiError, GenerationRequest, MockGenerativeModel};
    use serde_json::json;
    use std::time::Duration;

    fn analysis_json(score: u32) -> String {
        json!({
            "sustainabilityScore": score,
            "wastageDetected": 120,
            "gridReductionPercent": 30,
            "loadShiftWindows": ["12:00 PM - 2:00 PM", "9:00 PM - 11:00 PM"],
            "recommendations": ["a", "b", "c"],
            "esgInsights": ["SDG 7.2", "ISO 50001"],
            "summary": "Good renewable coverage."
        })
        .to_string()
    }

    fn forecast_json() -> String {
        let items: Vec<_> = (0..24)
            .map(|h| json!({"hour": h, "solarForecast": 100, "windForecast": 200}))
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    fn respond(req: &GenerationRequest, score: u32) -> Result<String, GenAiError> {
        if req.response_schema.is_array() {
            Ok(forecast_json())
        } else {
            Ok(analysis_json(score))
        }
    }

    fn controller(model: impl GenerativeModel + 'static) -> Arc<DashboardController> {
        let insights = InsightService::new(Arc::new(model), Duration::from_secs(5));
        let generator = CampusDataGenerator::new(&GeneratorConfig {
            random_seed: Some(11),
        });
        Arc::new(DashboardController::new(insights, generator))
    }

    #[tokio::test]
    async fn test_initial_state_is_idle_with_series() {
        let ctl = controller(MockGenerativeModel::new());
        let st = ctl.snapshot().await;

        assert_eq!(st.phase, RefreshPhase::Idle);
        assert_eq!(st.series.len(), 24);
        assert!(st.analysis.is_none());
        assert!(st.forecast.is_empty());
        assert!(st.error.is_none());
    }

    #[tokio::test]
    async fn test_successful_refresh_commits_everything() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_json()
            .times(2)
            .returning(|req| respond(req, 74));
        let ctl = controller(model);
        let before = ctl.snapshot().await.series;

        let st = ctl.refresh().await.unwrap();

        assert_eq!(st.phase, RefreshPhase::Ready);
        assert_eq!(st.analysis.as_ref().unwrap().sustainability_score, 74.0);
        assert_eq!(st.forecast.len(), 24);
        assert_ne!(st.series, before);
        assert!(st.updated_at.is_some());
        assert!(st.error.is_none());
        assert_eq!(ctl.snapshot().await.phase, RefreshPhase::Ready);
    }

    #[tokio::test]
    async fn test_forecast_failure_fails_cycle_and_hides_analysis() {
        let mut model = MockGenerativeModel::new();
        model.expect_generate_json().returning(|req| {
            if req.response_schema.is_array() {
                Err(GenAiError::Status {
                    status: 500,
                    message: "internal".to_string(),
                })
            } else {
                Ok(analysis_json(90))
            }
        });
        let ctl = controller(model);
        let before = ctl.snapshot().await.series;

        let err = ctl.refresh().await.unwrap_err();
        assert!(matches!(err, RefreshError::Insight(InsightError::Generation(_))));

        let st = ctl.snapshot().await;
        assert_eq!(st.phase, RefreshPhase::Failed);
        assert!(st.analysis.is_none());
        assert!(st.forecast.is_empty());
        assert_eq!(st.error.as_deref(), Some(REFRESH_FAILED_MESSAGE));
        assert_eq!(st.series, before);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_ready_data() {
        let mut model = MockGenerativeModel::new();
        let mut calls = 0;
        model.expect_generate_json().returning(move |req| {
            calls += 1;
            if calls > 2 {
                Ok("not json".to_string())
            } else {
                respond(req, 55)
            }
        });
        let ctl = controller(model);

        let ready = ctl.refresh().await.unwrap();
        assert!(ctl.refresh().await.is_err());

        let st = ctl.snapshot().await;
        assert_eq!(st.phase, RefreshPhase::Failed);
        assert_eq!(st.series, ready.series);
        assert_eq!(st.analysis, ready.analysis);
        assert_eq!(st.forecast, ready.forecast);
        assert_eq!(st.updated_at, ready.updated_at);
    }

    #[tokio::test]
    async fn test_retry_after_failure_recovers() {
        let mut model = MockGenerativeModel::new();
        let mut calls = 0;
        model.expect_generate_json().returning(move |req| {
            calls += 1;
            if calls <= 2 {
                Err(GenAiError::EmptyResponse("SAFETY".to_string()))
            } else {
                respond(req, 61)
            }
        });
        let ctl = controller(model);

        assert!(ctl.refresh().await.is_err());
        let st = ctl.refresh().await.unwrap();
        assert_eq!(st.phase, RefreshPhase::Ready);
        assert!(st.error.is_none());
    }

    struct Gated {
        release: Arc<tokio::sync::Notify>,
    }

    #[async_trait::async_trait]
    impl GenerativeModel for Gated {
        async fn generate_json(&self, req: &GenerationRequest) -> Result<String, GenAiError> {
            self.release.notified().await;
            respond(req, 40)
        }
    }

    #[tokio::test]
    async fn test_newer_refresh_supersedes_in_flight() {
        let release = Arc::new(tokio::sync::Notify::new());
        let ctl = controller(Gated {
            release: release.clone(),
        });

        let first = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.refresh().await }
        });
        while ctl.snapshot().await.phase != RefreshPhase::Loading {
            tokio::task::yield_now().await;
        }

        let second = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.refresh().await }
        });

        let stale = first.await.unwrap();
        assert!(matches!(stale, Err(RefreshError::Superseded)));
        assert_eq!(ctl.snapshot().await.phase, RefreshPhase::Loading);

        // Release waiters until the second refresh has both answers.
        while !second.is_finished() {
            release.notify_waiters();
            tokio::task::yield_now().await;
        }
        let st = second.await.unwrap().unwrap();
        assert_eq!(st.phase, RefreshPhase::Ready);
        assert_eq!(ctl.snapshot().await.phase, RefreshPhase::Ready);
    }

    struct Hung;

    #[async_trait::async_trait]
    impl GenerativeModel for Hung {
        async fn generate_json(&self, _req: &GenerationRequest) -> Result<String, GenAiError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_caller_still_settles_cycle() {
        let ctl = controller(Hung);

        let dropped = tokio::time::timeout(Duration::from_millis(50), ctl.refresh()).await;
        assert!(dropped.is_err());
        assert_eq!(ctl.snapshot().await.phase, RefreshPhase::Loading);

        // Past the 5s per-call timeout the detached cycle rolls back.
        tokio::time::sleep(Duration::from_secs(6)).await;
        let st = ctl.snapshot().await;
        assert_eq!(st.phase, RefreshPhase::Failed);
        assert_eq!(st.error.as_deref(), Some(REFRESH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_stale_cycle_does_not_relabel_ready_state() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_json()
            .times(2)
            .returning(|req| respond(req, 70));
        let ctl = controller(model);
        ctl.refresh().await.unwrap();

        let (stale, token) = ctl.begin();
        ctl.begin();

        let err = ctl.clone().run_cycle(stale, token).await.unwrap_err();
        assert!(matches!(err, RefreshError::Superseded));
        let st = ctl.snapshot().await;
        assert_eq!(st.phase, RefreshPhase::Ready);
        assert!(st.analysis.is_some());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RefreshPhase::Idle.to_string(), "idle");
        assert_eq!(RefreshPhase::Failed.to_string(), "failed");
        assert_eq!(serde_json::to_value(RefreshPhase::Ready).unwrap(), "ready");
    }
}

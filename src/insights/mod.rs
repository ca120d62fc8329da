//! Sustainability analysis and next-day forecast built on a [`GenerativeModel`].
//!
//! Both requests embed the full hourly series in a prompt, constrain the
//! model with a response schema, then parse and validate what comes back.
//! Any failure aborts the request; there is no retry or partial result.

pub mod analysis;
pub mod forecast;

pub use analysis::{analysis_prompt, analysis_schema};
pub use forecast::{forecast_prompt, forecast_schema};

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::genai::{GenAiError, GenerationRequest, GenerativeModel};

#[derive(Debug, Error)]
pub enum InsightError {
    #[error(transparent)]
    Generation(#[from] GenAiError),

    #[error("failed to encode energy series: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("model response is not valid JSON for this request: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("model response failed validation: {0}")]
    Invalid(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

/// Issues analysis and forecast requests against one model.
#[derive(Clone)]
pub struct InsightService {
    model: Arc<dyn GenerativeModel>,
    call_timeout: Duration,
}

impl InsightService {
    pub fn new(model: Arc<dyn GenerativeModel>, call_timeout: Duration) -> Self {
        Self {
            model,
            call_timeout,
        }
    }

    /// Run one generation call under the per-call timeout.
    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError> {
        match tokio::time::timeout(self.call_timeout, self.model.generate_json(&request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(InsightError::Timeout(self.call_timeout)),
        }
    }
}

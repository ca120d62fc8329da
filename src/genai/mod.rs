//! Generative model access.
//!
//! [`GenerativeModel`] is the seam the insight builders call through;
//! [`GeminiClient`] is the production implementation over the generative
//! language REST API.

pub mod gemini;
pub mod schema;

pub use gemini::GeminiClient;
pub use schema::{Schema, SchemaType};

use async_trait::async_trait;
use thiserror::Error;

/// One structured-output generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Shape the model is constrained to emit
    pub response_schema: Schema,
}

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("request to generative model failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative model returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed generative model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("generative model returned no text ({0})")]
    EmptyResponse(String),
}

/// A model that answers a prompt with JSON text matching the request schema.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw JSON text; parsing and validation belong to the caller.
    async fn generate_json(&self, request: &GenerationRequest) -> Result<String, GenAiError>;
}

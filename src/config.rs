use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub genai: GenAiConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            // A refresh waits on two model calls, so leave room above the per-call timeout.
            request_timeout_secs: 90,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Generative model endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenAiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key. Read on every call.
    pub api_key_env: String,
    pub request_timeout_seconds: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "API_KEY".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl GenAiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible series. `None` draws from OS entropy.
    pub random_seed: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::extract(
            Self::figment()
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("CEI__").split("__")),
        )
    }

    /// Base figment carrying the built-in defaults, so every file or env layer is optional.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    pub fn extract(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}

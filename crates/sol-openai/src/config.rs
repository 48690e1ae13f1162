//! OpenAI client configuration

use serde::{Deserialize, Serialize};
use sol_core::{Error, GenerationConfig, Result};
use std::env;
use std::time::Duration;

/// Configuration for the OpenAI-compatible client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Absent when the service runs without provider credentials
    pub api_key: Option<String>,
    pub api_base: String,
    pub embedding_model: String,
    pub llm_model: String,
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_EMBEDDING_MODEL: &'static str = "text-embedding-3-small";
    pub const DEFAULT_LLM_MODEL: &'static str = "gpt-3.5-turbo";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Create configuration from environment variables
    ///
    /// A missing `OPENAI_API_KEY` is not an error here: the embedding adapter
    /// refuses to run without it and the answer generator degrades to a notice.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let api_base = lookup("OPENAI_API_BASE")
            .unwrap_or_else(|| Self::DEFAULT_API_BASE.to_string());
        let api_base = validate_base_url(&api_base)?;

        let embedding_model = lookup("EMBEDDING_MODEL")
            .unwrap_or_else(|| Self::DEFAULT_EMBEDDING_MODEL.to_string());

        let llm_model = lookup("LLM_MODEL").unwrap_or_else(|| Self::DEFAULT_LLM_MODEL.to_string());

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::Configuration(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base,
            embedding_model,
            llm_model,
            timeout_secs,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            embedding_model: Self::DEFAULT_EMBEDDING_MODEL.to_string(),
            llm_model: Self::DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point the client at a different OpenAI-compatible server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Result<Self> {
        self.api_base = validate_base_url(&api_base.into())?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Completion settings for the configured chat model
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            model_id: self.llm_model.clone(),
            timeout: self.timeout(),
            ..GenerationConfig::default()
        }
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| Error::Configuration(format!("invalid OPENAI_API_BASE '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!(
            "OPENAI_API_BASE must be http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

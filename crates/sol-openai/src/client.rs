//! OpenAI-compatible client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use sol_core::{
    ChatMessage, Embedding, EmbeddingProvider, Error, GenerationConfig, GenerationResult,
    LLMProvider, Result,
};

use crate::config::OpenAiConfig;

/// OpenAI-compatible client for embeddings and chat completions
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Provider(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Configuration("OPENAI_API_KEY is not set".to_string()))
    }

    /// POST a JSON body and return the raw response text of a successful call
    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.config.api_base, path);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("request to {} failed: {}", path, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Provider(format!("failed to read {} response: {}", path, e)))?;

        if !status.is_success() {
            return Err(Error::Provider(format!(
                "OpenAI API request to {} failed with status {}: {}",
                path, status, text
            )));
        }

        Ok(text)
    }
}

/// Bound an outbound call by `limit`
async fn with_timeout<T>(
    what: &str,
    limit: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(format!(
            "{} request timed out after {}s",
            what,
            limit.as_secs()
        ))),
    }
}

/// Decode an embeddings response, restoring input order and checking the count
pub(crate) fn parse_embedding_response(body: &str, expected: usize) -> Result<Vec<Embedding>> {
    let mut response: EmbeddingResponse = serde_json::from_str(body)
        .map_err(|e| Error::Provider(format!("malformed embedding response: {}", e)))?;

    if response.data.len() != expected {
        return Err(Error::Provider(format!(
            "embedding response has {} vectors for {} inputs",
            response.data.len(),
            expected
        )));
    }

    response.data.sort_by_key(|item| item.index);
    Ok(response.data.into_iter().map(|item| item.embedding).collect())
}

/// Decode a chat completion response into trimmed answer text
pub(crate) fn parse_chat_response(body: &str) -> Result<(String, Option<u32>)> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::Provider(format!("malformed completion response: {}", e)))?;

    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Provider("completion response has no content".to_string()))?;

    Ok((text.trim().to_string(), response.usage.map(|u| u.total_tokens)))
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: texts,
        };

        let body = with_timeout(
            "embedding",
            self.config.timeout(),
            self.post_json("/embeddings", &request),
        )
        .await?;

        let embeddings = parse_embedding_response(&body, texts.len())?;
        debug!(count = embeddings.len(), model = %self.config.embedding_model, "embedded batch");
        Ok(embeddings)
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn model_id(&self) -> &str {
        &self.config.embedding_model
    }
}

#[async_trait]
impl LLMProvider for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let request = ChatRequest {
            model: &config.model_id,
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let body = with_timeout(
            "completion",
            config.timeout,
            self.post_json("/chat/completions", &request),
        )
        .await?;

        let (text, tokens_used) = parse_chat_response(&body)?;
        debug!(model = %config.model_id, ?tokens_used, "completion finished");

        Ok(GenerationResult {
            text,
            model_id: config.model_id.clone(),
            tokens_used,
        })
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn model_id(&self) -> &str {
        &self.config.llm_model
    }
}

//! Completion service client: the capability seam around the LLM API.
//!
//! The orchestrator only ever sees [`CompletionClient`], so it can be tested
//! against a fake implementation with no network at all. The one real
//! implementation, [`AnthropicClient`], speaks the Anthropic Messages API via
//! reqwest.
//!
//! Transport failures are *not* classified here — the client reports the raw
//! HTTP status and upstream message in a [`CompletionError`], and
//! [`crate::generate`] maps that onto the user-facing error taxonomy. Keeping
//! classification out of the transport layer means a different provider can
//! be dropped in without touching the error handling.

use crate::config::GenerationConfig;
use crate::error::BlogsmithError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// A raw completion failure, before classification.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CompletionError {
    /// HTTP status returned by the service, if the request got that far.
    pub status: Option<u16>,
    /// Upstream error message (or transport error description).
    pub message: String,
    /// Server-suggested delay from a `retry-after` header, when present.
    pub retry_after_secs: Option<u64>,
}

impl CompletionError {
    /// A failure that never reached the service (connect error, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            retry_after_secs: None,
        }
    }
}

/// The external completion service, abstracted to a single operation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one text-completion request and return the generated text.
    ///
    /// Single-shot: implementations must not retry internally.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

// ── Anthropic Messages API ───────────────────────────────────────────────

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AnthropicClient {
    /// Build a client from an explicit API key.
    ///
    /// The key is trimmed: trailing newlines from `.env` files are a
    /// recurring source of mysterious 401s.
    pub fn new(api_key: impl Into<String>, config: &GenerationConfig) -> Result<Self, BlogsmithError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(BlogsmithError::ApiKeyMissing);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| BlogsmithError::Generation {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// An absent or empty variable is a configuration error, reported
    /// distinctly from runtime API failures.
    pub fn from_env(config: &GenerationConfig) -> Result<Self, BlogsmithError> {
        let key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        if key.trim().is_empty() {
            return Err(BlogsmithError::ApiKeyMissing);
        }
        Self::new(key, config)
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

/// Extract the first text block from a Messages API response body.
fn extract_text(body: &str) -> Result<String, CompletionError> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::transport(format!("Unexpected response shape: {e}")))?;
    parsed
        .content
        .into_iter()
        .map(|block| block.text)
        .find(|text| !text.is_empty())
        .ok_or_else(|| CompletionError::transport("Completion response contained no text"))
}

/// Turn a non-2xx response body into a `CompletionError`, preferring the
/// structured `{"error": {"type", "message"}}` envelope when it parses.
fn error_from_response(status: u16, retry_after_secs: Option<u64>, body: &str) -> CompletionError {
    let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.kind.is_empty() {
                envelope.error.message
            } else {
                format!("{} ({})", envelope.error.message, envelope.error.kind)
            }
        }
        _ => format!("HTTP {status}: {body}"),
    };
    CompletionError {
        status: Some(status),
        message,
        retry_after_secs,
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request_body = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": user_prompt }
            ]
        });

        debug!(
            model = %self.model,
            max_tokens,
            system_len = system_prompt.len(),
            user_len = user_prompt.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), retry_after_secs, &body);
            error!(status = status.as_u16(), message = %err.message, "Completion request failed");
            return Err(err);
        }

        extract_text(&body)
    }
}

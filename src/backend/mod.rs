//! Backend trait and normalized request/response types.
//!
//! The [`Backend`] trait abstracts over model providers, translating between
//! normalized [`LlmRequest`]/[`LlmResponse`] types and provider-specific
//! HTTP APIs. Built-in implementations: [`AnthropicBackend`],
//! [`OllamaBackend`], and [`MockBackend`] for tests.
//!
//! ```text
//! RecipeGenerator ──► LlmRequest ──► Backend::complete() ──► LlmResponse
//!                                            │
//!                              ┌─────────────┼─────────────┐
//!                      AnthropicBackend  OllamaBackend  MockBackend
//!                        /v1/messages    /api/generate   canned text
//! ```
//!
//! There is no retry layer: a failed call surfaces once and the generator
//! turns it into the error recipe.

pub mod anthropic;
pub mod mock;
pub mod ollama;

pub use anthropic::AnthropicBackend;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::MenuError;
use async_trait::async_trait;
use reqwest::Client;

/// A normalized, provider-agnostic LLM request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"claude-3-haiku-20240307"`, `"llama3.2:3b"`).
    pub model: String,

    /// The single user prompt.
    pub prompt: String,

    /// Sampling configuration (temperature, max_tokens).
    pub config: LlmConfig,
}

/// A normalized LLM response.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated text content.
    pub text: String,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,

    /// Provider-specific metadata (token counts, model info).
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over model providers.
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a single non-streaming completion.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Send a JSON body and return the decoded JSON reply.
///
/// Non-success statuses become [`MenuError::HttpError`] carrying the body text.
pub(crate) async fn post_json(
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<(serde_json::Value, u16)> {
    let resp = request.json(body).send().await?;
    let status = resp.status().as_u16();

    if !resp.status().is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(MenuError::HttpError { status, body: text });
    }

    let json_resp: serde_json::Value = resp.json().await?;
    Ok((json_resp, status))
}

/// Copy the named top-level fields of a provider reply into a metadata object.
pub(crate) fn pick_metadata(json_resp: &serde_json::Value, keys: &[&str]) -> Option<serde_json::Value> {
    let mut meta = serde_json::Map::new();
    for key in keys {
        if let Some(v) = json_resp.get(*key) {
            meta.insert((*key).to_string(), v.clone());
        }
    }
    if meta.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_metadata_present() {
        let resp = json!({"model": "m", "usage": {"output_tokens": 12}, "content": []});
        let meta = pick_metadata(&resp, &["model", "usage", "id"]).unwrap();
        assert_eq!(meta["model"], "m");
        assert_eq!(meta["usage"]["output_tokens"], 12);
        assert!(meta.get("id").is_none());
    }

    #[test]
    fn test_pick_metadata_absent() {
        assert!(pick_metadata(&json!({"content": []}), &["usage"]).is_none());
    }

    #[tokio::test]
    async fn test_post_json_connection_failure_is_request_error() {
        let client = Client::new();
        let result = post_json(client.post("http://127.0.0.1:9/unreachable"), &json!({})).await;
        assert!(matches!(result, Err(MenuError::Request(_))));
    }
}

//! Backend for Anthropic's Messages API.
//!
//! Endpoint: `/v1/messages`. The request carries a single user message; the
//! reply text is taken from the first `text` content block.

use super::{pick_metadata, post_json, Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::MenuError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// API version header sent with every request.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Backend for the Anthropic Messages API.
///
/// # Example
///
/// ```
/// use menu_builder::backend::AnthropicBackend;
///
/// let backend = AnthropicBackend::new("sk-ant-...");
/// ```
#[derive(Clone)]
pub struct AnthropicBackend {
    api_key: String,
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = if self.api_key.chars().count() > 6 {
            format!("{}***", self.api_key.chars().take(6).collect::<String>())
        } else {
            "***".to_string()
        };
        f.debug_struct("AnthropicBackend")
            .field("api_key", &masked)
            .finish()
    }
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Build the request body for `/v1/messages`.
    fn build_body(request: &LlmRequest) -> Value {
        json!({
            "model": request.model,
            "max_tokens": request.config.max_tokens,
            "temperature": request.config.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": [{"type": "text", "text": request.prompt}],
                }
            ],
        })
    }

    /// Pull the first text block out of a Messages API reply.
    fn extract_text(json_resp: &Value) -> Option<String> {
        json_resp
            .get("content")?
            .as_array()?
            .iter()
            .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .and_then(|block| block.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[async_trait]
impl Backend for AnthropicBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/v1/messages", base_url.trim_end_matches('/'));
        let body = Self::build_body(request);

        let http = client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let (json_resp, status) = post_json(http, &body).await?;

        let text = Self::extract_text(&json_resp).ok_or_else(|| {
            MenuError::Other("No text content in Anthropic response".to_string())
        })?;

        Ok(LlmResponse {
            text,
            status,
            metadata: pick_metadata(&json_resp, &["id", "model", "usage", "stop_reason"]),
        })
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

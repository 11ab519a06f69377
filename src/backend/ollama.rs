//! Backend for Ollama's native API.
//!
//! [`OllamaBackend`] sends normalized [`LlmRequest`]s to `/api/generate`
//! with `stream: false`, for running the planner against a local model.

use super::{pick_metadata, post_json, Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Backend for Ollama's native API (`/api/generate`, prompt-only).
#[derive(Debug, Clone)]
pub struct OllamaBackend;

impl OllamaBackend {
    /// Build the JSON body for `/api/generate`.
    fn build_generate_body(request: &LlmRequest) -> Value {
        json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": request.config.temperature,
                "num_predict": request.config.max_tokens,
            },
        })
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));
        let body = Self::build_generate_body(request);
        let (json_resp, status) = post_json(client.post(&url), &body).await?;

        let text = json_resp
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        Ok(LlmResponse {
            text,
            status,
            metadata: pick_metadata(
                &json_resp,
                &["model", "total_duration", "eval_count", "prompt_eval_count"],
            ),
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

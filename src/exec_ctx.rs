//! Execution context shared across generation calls.
//!
//! [`ExecCtx`] carries the HTTP client, model backend, and endpoint. It is
//! constructed once per session and borrowed by every [`RecipeGenerator`]
//! call.
//!
//! [`RecipeGenerator`]: crate::generator::RecipeGenerator

use crate::backend::{AnthropicBackend, Backend, MockBackend, OllamaBackend};
use crate::config::{AppConfig, BackendKind};
use crate::error::{MenuError, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared execution context for generation calls.
///
/// # Example
///
/// ```
/// use menu_builder::{ExecCtx, MockBackend};
/// use std::sync::Arc;
///
/// let ctx = ExecCtx::builder("http://unused")
///     .backend(Arc::new(MockBackend::sample_recipe()))
///     .build()
///     .unwrap();
/// assert_eq!(ctx.backend.name(), "mock");
/// ```
pub struct ExecCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL for the provider (e.g. `https://api.anthropic.com`).
    pub base_url: String,
    /// Model backend. Default: [`OllamaBackend`].
    pub backend: Arc<dyn Backend>,
}

impl ExecCtx {
    /// Create a new builder.
    pub fn builder(base_url: impl Into<String>) -> ExecCtxBuilder {
        ExecCtxBuilder {
            client: None,
            base_url: base_url.into(),
            backend: None,
            timeout: None,
        }
    }

    /// Build a context for whichever backend the configuration selects.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend: Arc<dyn Backend> = match config.backend {
            BackendKind::Anthropic => {
                let key = config.api_key.clone().ok_or_else(|| {
                    MenuError::InvalidConfig("anthropic backend requires an API key".to_string())
                })?;
                Arc::new(AnthropicBackend::new(key))
            }
            BackendKind::Ollama => Arc::new(OllamaBackend),
            BackendKind::Mock => Arc::new(MockBackend::sample_recipe()),
        };

        ExecCtx::builder(config.base_url.clone())
            .backend(backend)
            .timeout(config.timeout)
            .build()
    }
}

impl std::fmt::Debug for ExecCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecCtx")
            .field("base_url", &self.base_url)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Builder for [`ExecCtx`].
pub struct ExecCtxBuilder {
    client: Option<Client>,
    base_url: String,
    backend: Option<Arc<dyn Backend>>,
    timeout: Option<Duration>,
}

impl ExecCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the model backend. Default: [`OllamaBackend`].
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Ignored when a custom `Client` is supplied via `.client()`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the execution context.
    pub fn build(self) -> Result<ExecCtx> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(Duration::from_secs(60)))
                .build()?,
        };
        Ok(ExecCtx {
            client,
            base_url: normalize_base_url(&self.base_url),
            backend: self.backend.unwrap_or_else(|| Arc::new(OllamaBackend)),
        })
    }
}

/// Strip known provider path suffixes from a base URL.
/// This prevents double-pathing when backends append their own paths.
/// e.g., "https://api.anthropic.com/v1" -> "https://api.anthropic.com"
/// e.g., "http://localhost:11434/api" -> "http://localhost:11434"
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    // Longest first
    for suffix in &["/v1/messages", "/v1", "/api/generate", "/api"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize_base_url_strips_v1() {
        assert_eq!(normalize_base_url("https://api.anthropic.com/v1"), "https://api.anthropic.com");
        assert_eq!(normalize_base_url("https://api.anthropic.com/v1/"), "https://api.anthropic.com");
    }

    #[test]
    fn test_normalize_base_url_strips_full_path() {
        assert_eq!(
            normalize_base_url("https://api.anthropic.com/v1/messages"),
            "https://api.anthropic.com"
        );
        assert_eq!(normalize_base_url("http://localhost:11434/api/generate"), "http://localhost:11434");
    }

    #[test]
    fn test_normalize_base_url_preserves_clean() {
        assert_eq!(normalize_base_url("http://localhost:11434"), "http://localhost:11434");
        assert_eq!(normalize_base_url("http://localhost:11434/"), "http://localhost:11434");
    }

    #[test]
    fn test_default_backend_is_ollama() {
        let ctx = ExecCtx::builder("http://localhost:11434").build().unwrap();
        assert_eq!(ctx.backend.name(), "ollama");
    }

    #[test]
    fn test_from_config_selects_backend() {
        let vars: HashMap<&str, &str> = [("MENU_BUILDER_BACKEND", "mock")].into_iter().collect();
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        let ctx = ExecCtx::from_config(&config).unwrap();
        assert_eq!(ctx.backend.name(), "mock");

        let vars: HashMap<&str, &str> = [("ANTHROPIC_API_KEY", "sk-ant-test")].into_iter().collect();
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        let ctx = ExecCtx::from_config(&config).unwrap();
        assert_eq!(ctx.backend.name(), "anthropic");
        assert_eq!(ctx.base_url, "https://api.anthropic.com");
    }

    #[test]
    fn test_debug_output() {
        let ctx = ExecCtx::builder("http://localhost:11434/").build().unwrap();
        let rendered = format!("{:?}", ctx);
        assert!(rendered.contains("ollama"));
        assert!(rendered.contains("http://localhost:11434"));
    }
}

//! Request and application configuration.
//!
//! [`LlmConfig`] carries per-request sampling settings. [`AppConfig`] is
//! loaded once from the environment (and an optional `.env` file) and decides
//! which backend the CLI talks to.

use crate::error::{MenuError, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for LLM requests.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl LlmConfig {
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }
}

/// Which model provider to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Anthropic,
    Ollama,
    /// Canned responses; no network.
    Mock,
}

impl BackendKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            BackendKind::Anthropic => DEFAULT_ANTHROPIC_URL,
            BackendKind::Ollama => DEFAULT_OLLAMA_URL,
            BackendKind::Mock => "http://unused",
        }
    }
}

impl FromStr for BackendKind {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(BackendKind::Anthropic),
            "ollama" => Ok(BackendKind::Ollama),
            "mock" => Ok(BackendKind::Mock),
            other => Err(MenuError::InvalidConfig(format!(
                "unknown backend '{}' (expected anthropic, ollama, or mock)",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackendKind::Anthropic => "anthropic",
            BackendKind::Ollama => "ollama",
            BackendKind::Mock => "mock",
        })
    }
}

/// Application settings resolved from the environment.
#[derive(Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    /// Required for [`BackendKind::Anthropic`].
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfig {
    /// Load `.env` if present, then read settings from the process environment.
    ///
    /// - `MENU_BUILDER_BACKEND`: `anthropic` (default), `ollama`, or `mock`
    /// - `ANTHROPIC_API_KEY`: required for the anthropic backend
    /// - `MENU_BUILDER_MODEL`: model identifier (default `claude-3-haiku-20240307`)
    /// - `MENU_BUILDER_BASE_URL`: provider base URL (default depends on backend)
    /// - `MENU_BUILDER_MAX_TOKENS`: generation cap (default 4096)
    /// - `MENU_BUILDER_TIMEOUT_SECS`: HTTP timeout (default 60)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("MENU_BUILDER_BACKEND") {
            Some(v) => v.parse()?,
            None => BackendKind::Anthropic,
        };

        let api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if backend == BackendKind::Anthropic && api_key.is_none() {
            return Err(MenuError::InvalidConfig(
                "ANTHROPIC_API_KEY must be set for the anthropic backend".to_string(),
            ));
        }

        let model = lookup("MENU_BUILDER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("MENU_BUILDER_BASE_URL")
            .unwrap_or_else(|| backend.default_base_url().to_string());
        let max_tokens = parse_var(&lookup, "MENU_BUILDER_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let timeout_secs = parse_var(&lookup, "MENU_BUILDER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            backend,
            api_key,
            model,
            base_url,
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base request settings; the temperature is overridden per recipe.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig::default().with_max_tokens(self.max_tokens)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            MenuError::InvalidConfig(format!("{} has an invalid value: '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

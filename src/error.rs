use thiserror::Error;

/// Errors produced by the generation client, plan I/O, and configuration.
///
/// The recipe parser and the ingredient aggregator never return these; they
/// degrade to sentinel values instead.
#[derive(Error, Debug)]
pub enum MenuError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON encoding or decoding failed at the serde level.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed at the serde level.
    #[cfg(feature = "yaml")]
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading or writing a plan file or exported document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model provider returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpError {
        /// HTTP status code (e.g. 401, 429, 500).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Invalid configuration detected while loading settings or building a request.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A plan file could not be interpreted.
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for MenuError {
    fn from(err: anyhow::Error) -> Self {
        MenuError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;

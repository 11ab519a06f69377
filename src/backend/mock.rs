//! Mock backend for testing without a live model.
//!
//! [`MockBackend`] returns pre-configured responses in order, or fails every
//! call, so generation and its error fallback can be tested deterministically.
//!
//! # Example
//!
//! ```
//! use menu_builder::backend::MockBackend;
//!
//! let mock = MockBackend::fixed("Title: Toast");
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::MenuError;

/// A test backend that returns canned responses in order.
///
/// Cycles back to the beginning when all responses have been consumed.
/// Every prompt it receives is recorded for inspection.
#[derive(Debug)]
pub struct MockBackend {
    responses: Vec<String>,
    index: AtomicUsize,
    failure: Option<u16>,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock backend with the given canned responses.
    ///
    /// Responses are returned in order. When exhausted, cycles from the beginning.
    pub fn new(responses: Vec<String>) -> Self {
        assert!(!responses.is_empty(), "MockBackend requires at least one response");
        Self {
            responses,
            index: AtomicUsize::new(0),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Create a mock whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            responses: Vec::new(),
            index: AtomicUsize::new(0),
            failure: Some(status),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A well-formed recipe reply, as the planner expects from a real model.
    pub fn sample_recipe() -> Self {
        Self::fixed(
            "Title: Lemon Herb Chicken\n\
             Description: Pan-seared chicken with a bright lemon sauce.\n\
             Ingredients:\n\
             - 2 chicken breasts\n\
             - 1 lemon\n\
             - 2 tbsp olive oil\n\
             - fresh parsley\n\
             Instructions:\n\
             1. Season and sear the chicken.\n\
             2. Deglaze with lemon juice.\n\
             3. Garnish with parsley.",
        )
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> String {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        self.responses[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.prompt.clone());
        }

        if let Some(status) = self.failure {
            return Err(MenuError::HttpError {
                status,
                body: "mock failure".to_string(),
            });
        }

        Ok(LlmResponse {
            text: self.next_response(),
            status: 200,
            metadata: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

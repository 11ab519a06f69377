//! Recipe generation: prompt rendering, backend dispatch, and parsing.
//!
//! [`RecipeGenerator`] renders the recipe prompt for a [`RecipeRequest`],
//! makes exactly one backend call through an [`ExecCtx`], and parses the
//! reply with [`parse_recipe_output`]. [`RecipeGenerator::generate`] never
//! fails: transport and provider errors become [`Recipe::generation_failed`]
//! without the parser ever running.

use crate::{
    backend::{LlmRequest, LlmResponse},
    config::{LlmConfig, DEFAULT_MODEL},
    error::Result,
    exec_ctx::ExecCtx,
    parsing::parse_recipe_output,
    prompt,
    types::{Recipe, RecipeRequest},
};
use tracing::{debug, error, info};

/// Generates recipes from a model backend.
///
/// # Example
///
/// ```
/// use menu_builder::{ExecCtx, MockBackend, RecipeGenerator};
/// use menu_builder::types::{Cuisine, Protein, RecipeRequest, SpiceLevel};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let ctx = ExecCtx::builder("http://unused")
///     .backend(Arc::new(MockBackend::sample_recipe()))
///     .build()
///     .unwrap();
/// let generator = RecipeGenerator::new();
/// let request = RecipeRequest::new(Cuisine::Italian, Protein::Chicken, SpiceLevel::Mild);
///
/// let recipe = generator.generate(&ctx, &request).await;
/// assert_eq!(recipe.title, "Lemon Herb Chicken");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct RecipeGenerator {
    /// Model identifier sent to the backend.
    model: String,
    /// Base sampling configuration; the temperature comes from each request.
    config: LlmConfig,
}

impl Default for RecipeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeGenerator {
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            config: LlmConfig::default(),
        }
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the base LLM config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base LLM configuration.
    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the backend request for a recipe request.
    pub fn build_request(&self, request: &RecipeRequest) -> LlmRequest {
        LlmRequest {
            model: self.model.clone(),
            prompt: prompt::recipe_prompt(request),
            config: self.config.clone().with_temperature(request.temperature),
        }
    }

    /// Call the backend once and return its raw reply.
    pub async fn complete_raw(&self, ctx: &ExecCtx, request: &RecipeRequest) -> Result<LlmResponse> {
        let llm_request = self.build_request(request);
        debug!(
            backend = ctx.backend.name(),
            model = %self.model,
            temperature = llm_request.config.temperature,
            "requesting recipe"
        );
        let response = ctx
            .backend
            .complete(&ctx.client, &ctx.base_url, &llm_request)
            .await?;
        debug!(status = response.status, text = %response.text, "model replied");
        Ok(response)
    }

    /// Generate and parse a recipe, surfacing transport and provider errors.
    pub async fn try_generate(&self, ctx: &ExecCtx, request: &RecipeRequest) -> Result<Recipe> {
        let response = self.complete_raw(ctx, request).await?;
        Ok(parse_recipe_output(&response.text))
    }

    /// Generate and parse a recipe.
    ///
    /// Any failure is logged and replaced by [`Recipe::generation_failed`].
    pub async fn generate(&self, ctx: &ExecCtx, request: &RecipeRequest) -> Recipe {
        match self.try_generate(ctx, request).await {
            Ok(recipe) => {
                info!(
                    title = %recipe.title,
                    cuisine = %request.cuisine,
                    protein = %request.protein,
                    "recipe generated"
                );
                recipe
            }
            Err(e) => {
                error!(error = %e, backend = ctx.backend.name(), "unable to generate recipe");
                Recipe::generation_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::types::{Cuisine, Protein, SpiceLevel};
    use std::sync::Arc;

    fn ctx_with(mock: MockBackend) -> (ExecCtx, Arc<MockBackend>) {
        let mock = Arc::new(mock);
        let ctx = ExecCtx::builder("http://unused")
            .backend(mock.clone())
            .build()
            .unwrap();
        (ctx, mock)
    }

    fn request() -> RecipeRequest {
        RecipeRequest::new(Cuisine::Mediterranean, Protein::Chicken, SpiceLevel::Medium)
    }

    #[test]
    fn test_build_request() {
        let generator = RecipeGenerator::new()
            .with_model("claude-test")
            .with_config(LlmConfig::default().with_max_tokens(1024));
        let req = request().with_temperature(0.3).unwrap();

        let llm_request = generator.build_request(&req);
        assert_eq!(llm_request.model, "claude-test");
        assert_eq!(llm_request.config.max_tokens, 1024);
        assert!((llm_request.config.temperature - 0.3).abs() < f64::EPSILON);
        assert!(llm_request
            .prompt
            .contains("Create a Medium Mediterranean dish featuring Chicken."));
    }

    #[tokio::test]
    async fn test_generate_parses_reply() {
        let (ctx, _) = ctx_with(MockBackend::sample_recipe());
        let recipe = RecipeGenerator::new().generate(&ctx, &request()).await;
        assert_eq!(recipe.title, "Lemon Herb Chicken");
        assert_eq!(
            recipe.ingredients,
            vec!["2 chicken breasts", "1 lemon", "2 tbsp olive oil", "fresh parsley"]
        );
        assert_eq!(recipe.instructions.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_generate_sends_rendered_prompt() {
        let (ctx, mock) = ctx_with(MockBackend::fixed("Title: X"));
        RecipeGenerator::new().generate(&ctx, &request()).await;
        let prompts = mock.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Generate a structured recipe"));
    }

    #[tokio::test]
    async fn test_generate_failure_yields_sentinel() {
        let (ctx, _) = ctx_with(MockBackend::failing(500));
        let recipe = RecipeGenerator::new().generate(&ctx, &request()).await;
        assert_eq!(recipe, Recipe::generation_failed());
    }

    #[tokio::test]
    async fn test_try_generate_surfaces_error() {
        let (ctx, _) = ctx_with(MockBackend::failing(401));
        let result = RecipeGenerator::new().try_generate(&ctx, &request()).await;
        assert!(matches!(
            result,
            Err(crate::MenuError::HttpError { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_unstructured_reply_gives_defaults() {
        let (ctx, _) = ctx_with(MockBackend::fixed("I'm sorry, I can't help with that."));
        let recipe = RecipeGenerator::new().generate(&ctx, &request()).await;
        assert_eq!(recipe, Recipe::default());
    }

    #[tokio::test]
    async fn test_unreachable_provider_yields_sentinel() {
        let ctx = ExecCtx::builder("http://127.0.0.1:9")
            .backend(Arc::new(crate::backend::OllamaBackend))
            .build()
            .unwrap();
        let recipe = RecipeGenerator::new().generate(&ctx, &request()).await;
        assert_eq!(recipe.description, "Could not generate recipe.");
    }
}

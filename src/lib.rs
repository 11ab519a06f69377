//! # Menu Builder
//!
//! Weekly meal planning around generated recipes.
//!
//! A [`WeeklyPlan`] holds a lunch and a dinner slot for each day. Slots are
//! filled by hand or by a [`RecipeGenerator`], which prompts a model backend
//! and turns its reply into a [`Recipe`]. From a plan the crate renders a
//! weekly menu and an aggregated grocery list, and exports either one as a
//! Latin-1 text document.
//!
//! ## Core Concepts
//!
//! - **[`parse_recipe_output`]**: total parser from raw model text to a
//!   [`Recipe`], substituting sentinels for anything missing.
//! - **[`aggregate_ingredients`]**: sums quantity-prefixed ingredient lines
//!   across the plan into a [`GroceryList`].
//! - **[`ExecCtx`]**: shared HTTP client, endpoint and [`backend::Backend`].
//! - **[`RecipeGenerator`]**: one prompt, one backend call, one parse.
//!
//! ## Quick Start
//!
//! ```
//! use menu_builder::{aggregate_ingredients, parse_recipe_output, Day, MealSlot, WeeklyPlan};
//!
//! let recipe = parse_recipe_output(
//!     "Title: Pancakes\nDescription: Fluffy.\n- 2 cups flour\n- 1 egg\n1. Mix.\n2. Fry.",
//! );
//!
//! let mut plan = WeeklyPlan::new();
//! let meal = plan.meal_mut(Day::Saturday, MealSlot::Lunch);
//! meal.title = recipe.title;
//! meal.ingredients = recipe.ingredients;
//!
//! let groceries = aggregate_ingredients(&plan);
//! assert_eq!(groceries.items["cups flour"], 2.0);
//! assert_eq!(groceries.items["egg"], 1.0);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod exec_ctx;
pub mod export;
pub mod generator;
pub mod grocery;
pub mod logging;
pub mod parsing;
pub mod plan;
pub mod prompt;
pub mod types;

pub use backend::{AnthropicBackend, MockBackend, OllamaBackend};
pub use config::{AppConfig, BackendKind, LlmConfig};
pub use error::{MenuError, Result};
pub use exec_ctx::{ExecCtx, ExecCtxBuilder};
pub use generator::RecipeGenerator;
pub use grocery::{aggregate_ingredients, GroceryList};
pub use parsing::parse_recipe_output;
pub use plan::{Day, DayPlan, ManualMeal, Meal, MealSlot, WeeklyPlan};
pub use types::{Cuisine, Protein, Recipe, RecipeRequest, SpiceLevel};

use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_INGREDIENTS: &str = "No ingredients listed.";
pub const NO_INSTRUCTIONS: &str = "No instructions provided.";

pub const ERROR_TITLE: &str = "Error";
pub const PARSE_FAILED: &str = "Could not parse recipe.";
pub const GENERATION_FAILED: &str = "Could not generate recipe.";
pub const TRY_AGAIN: &str = "Please try again.";

/// Default sampling temperature for recipe generation.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Lowest temperature a [`RecipeRequest`] accepts.
pub const MIN_TEMPERATURE: f64 = 0.1;
/// Highest temperature a [`RecipeRequest`] accepts.
pub const MAX_TEMPERATURE: f64 = 1.0;

/// One generated or manually entered meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub description: String,
    /// One entry per ingredient line, in source order.
    pub ingredients: Vec<String>,
    /// Numbered step lines joined with `\n`.
    pub instructions: String,
}

impl Recipe {
    /// Recipe returned when the parser hits an internal fault.
    pub fn unparseable() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            description: PARSE_FAILED.to_string(),
            ingredients: Vec::new(),
            instructions: TRY_AGAIN.to_string(),
        }
    }

    /// Recipe returned when the generation call itself fails.
    pub fn generation_failed() -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            description: GENERATION_FAILED.to_string(),
            ingredients: Vec::new(),
            instructions: TRY_AGAIN.to_string(),
        }
    }
}

impl Default for Recipe {
    /// The fully defaulted recipe: every field holds its "absent" sentinel.
    fn default() -> Self {
        Self {
            title: UNTITLED_RECIPE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            ingredients: vec![NO_INGREDIENTS.to_string()],
            instructions: NO_INSTRUCTIONS.to_string(),
        }
    }
}

macro_rules! catalog {
    ($(#[$meta:meta])* $name:ident, $label:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every option, in menu order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MenuError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let known: Vec<&str> = $name::ALL.iter().map(|o| o.as_str()).collect();
                        MenuError::InvalidConfig(format!(
                            "unknown {} '{}' (expected one of: {})",
                            $label,
                            wanted,
                            known.join(", ")
                        ))
                    })
            }
        }
    };
}

catalog!(
    /// Cuisine styles offered for generation.
    Cuisine,
    "cuisine",
    [Italian, Mexican, Indian, American, Chinese, Japanese, Mediterranean]
);

catalog!(
    /// Main proteins offered for generation.
    Protein,
    "protein",
    [Chicken, Beef, Pork, Fish, Tofu, Lamb, Vegetarian]
);

catalog!(
    /// Spice levels offered for generation.
    SpiceLevel,
    "spice level",
    [Mild, Medium, Spicy]
);

/// Parameters for generating one recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub cuisine: Cuisine,
    pub protein: Protein,
    pub spice_level: SpiceLevel,
    /// Sampling temperature in `[0.1, 1.0]`.
    pub temperature: f64,
}

impl RecipeRequest {
    pub fn new(cuisine: Cuisine, protein: Protein, spice_level: SpiceLevel) -> Self {
        Self {
            cuisine,
            protein,
            spice_level,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set the temperature, rejecting values outside `[0.1, 1.0]`.
    pub fn with_temperature(mut self, temperature: f64) -> Result<Self> {
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(MenuError::InvalidConfig(format!(
                "temperature {} is outside {}..={}",
                temperature, MIN_TEMPERATURE, MAX_TEMPERATURE
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }
}

//! Recipe text parsing for model responses.
//!
//! Generated recipes loosely follow a labeled template (`Title:`,
//! `Description:`, `-` ingredient bullets, numbered steps). Nothing
//! guarantees the model honors it, so [`parse_recipe_output`] always returns a
//! complete [`Recipe`], substituting sentinel values for anything it never saw.

use crate::types::{Recipe, NO_DESCRIPTION, NO_INGREDIENTS, NO_INSTRUCTIONS, UNTITLED_RECIPE};
use tracing::warn;

const TITLE_LABEL: &str = "Title:";
const DESCRIPTION_LABEL: &str = "Description:";
const INGREDIENT_BULLET: char = '-';

/// Internal parser faults. Never returned to callers of [`parse_recipe_output`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A zero-length line reached classification.
    #[error("cannot classify an empty line")]
    EmptyLine,
}

/// What a single trimmed line of a response contributes to the recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Title(&'a str),
    Description(&'a str),
    Ingredient(&'a str),
    /// A numbered step, kept verbatim including its number.
    Instruction(&'a str),
    Ignored,
}

/// Classify one line by its prefix.
///
/// Labels are checked in order: `Title:`, `Description:`, `-`, then a leading
/// ASCII digit. Empty input is a fault rather than [`LineKind::Ignored`].
pub fn classify_line(line: &str) -> Result<LineKind<'_>, ParseError> {
    let first = line.chars().next().ok_or(ParseError::EmptyLine)?;

    if let Some(rest) = line.strip_prefix(TITLE_LABEL) {
        return Ok(LineKind::Title(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix(DESCRIPTION_LABEL) {
        return Ok(LineKind::Description(rest.trim()));
    }
    if let Some(rest) = line.strip_prefix(INGREDIENT_BULLET) {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return Ok(LineKind::Ingredient(rest.trim()));
    }
    if first.is_ascii_digit() {
        return Ok(LineKind::Instruction(line));
    }
    Ok(LineKind::Ignored)
}

/// Parse raw generated text into a [`Recipe`], surfacing internal faults.
///
/// Most callers want [`parse_recipe_output`], which never fails.
pub fn try_parse_recipe(raw: &str) -> Result<Recipe, ParseError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();

    for line in raw.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        match classify_line(line)? {
            LineKind::Title(t) => title = t.to_string(),
            LineKind::Description(d) => description = d.to_string(),
            LineKind::Ingredient(i) => ingredients.push(i.to_string()),
            LineKind::Instruction(step) => instructions.push(step),
            LineKind::Ignored => {}
        }
    }

    let instructions = instructions.join("\n");

    Ok(Recipe {
        title: or_sentinel(title, UNTITLED_RECIPE),
        description: or_sentinel(description, NO_DESCRIPTION),
        ingredients: if ingredients.is_empty() {
            vec![NO_INGREDIENTS.to_string()]
        } else {
            ingredients
        },
        instructions: or_sentinel(instructions, NO_INSTRUCTIONS),
    })
}

/// Parse raw generated text into a [`Recipe`].
///
/// Total: an internal fault yields [`Recipe::unparseable`] instead of an error.
///
/// # Example
///
/// ```
/// use menu_builder::parsing::parse_recipe_output;
///
/// let recipe = parse_recipe_output("Title: Dal\n- 1 cup lentils\n1. Simmer.");
/// assert_eq!(recipe.title, "Dal");
/// assert_eq!(recipe.ingredients, vec!["1 cup lentils"]);
/// assert_eq!(recipe.description, "No description provided.");
/// ```
pub fn parse_recipe_output(raw: &str) -> Recipe {
    match try_parse_recipe(raw) {
        Ok(recipe) => recipe,
        Err(e) => {
            warn!(error = %e, "could not parse recipe output");
            Recipe::unparseable()
        }
    }
}

fn or_sentinel(value: String, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}

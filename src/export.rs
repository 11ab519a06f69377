//! Plain-text document export for the weekly menu, grocery list, and recipes.
//!
//! Documents are written Latin-1 encoded; [`sanitize_text`] drops anything
//! outside that range (emoji, CJK, typographic quotes) before writing.

use crate::error::Result;
use crate::grocery::GroceryList;
use crate::plan::{MealSlot, WeeklyPlan};
use crate::types::Recipe;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub const MENU_FILE_NAME: &str = "weekly_menu.txt";
pub const GROCERY_FILE_NAME: &str = "grocery_list.txt";

const NO_RECIPE_SELECTED: &str = "No Recipe Selected";
const EAT_OUT: &str = "Eat Out";

/// Remove every character that cannot be encoded in Latin-1.
pub fn sanitize_text(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) <= 0xFF).collect()
}

/// Format a summed quantity for display: at most two decimals, no trailing zeros.
///
/// ```
/// use menu_builder::export::format_quantity;
///
/// assert_eq!(format_quantity(4.0), "4");
/// assert_eq!(format_quantity(0.1 + 0.2), "0.3");
/// assert_eq!(format_quantity(1.126), "1.13");
/// ```
pub fn format_quantity(quantity: f64) -> String {
    let rounded = format!("{:.2}", quantity);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render the read-only weekly menu summary.
pub fn render_menu(plan: &WeeklyPlan) -> String {
    let mut out = String::from("Weekly Menu\n\n");

    for (day, day_plan) in plan.iter() {
        let _ = writeln!(out, "{}", day);
        for slot in MealSlot::ALL {
            let title = if day_plan.eat_out {
                EAT_OUT
            } else {
                let title = day_plan.meal(slot).title.trim();
                if title.is_empty() {
                    NO_RECIPE_SELECTED
                } else {
                    title
                }
            };
            let _ = writeln!(out, "{}: {}", slot, title);
        }
        out.push('\n');
    }

    out
}

/// Render the consolidated grocery list followed by any unmatched items.
pub fn render_grocery_list(list: &GroceryList) -> String {
    let mut out = String::from("Grocery List\n\nConsolidated Items:\n");

    if list.items.is_empty() {
        out.push_str("No ingredients found in the menu.\n");
    }
    for (name, quantity) in &list.items {
        let _ = writeln!(out, "- {} {}", format_quantity(*quantity), name);
    }

    if !list.unmatched.is_empty() {
        out.push_str("\nUnmatched Items:\n");
        for item in &list.unmatched {
            let _ = writeln!(out, "- {}", item);
        }
    }

    out
}

/// Render a single recipe as a readable card.
pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", recipe.title);
    let _ = writeln!(out, "{}\n", recipe.description);
    out.push_str("Ingredients:\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "- {}", ingredient);
    }
    let _ = writeln!(out, "\nInstructions:\n{}", recipe.instructions);
    out
}

/// Sanitize a rendered document and write it as Latin-1 bytes.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let bytes: Vec<u8> = sanitize_text(text)
        .chars()
        .map(|c| u32::from(c) as u8)
        .collect();
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(())
}

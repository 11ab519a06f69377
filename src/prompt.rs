use crate::types::RecipeRequest;
use std::collections::HashMap;

/// Sentinel that should never appear in real templates.
const ESCAPE_SENTINEL: &str = "\x00LBRACE\x00";
/// Sentinel for escaped closing brace.
const ESCAPE_SENTINEL_CLOSE: &str = "\x00RBRACE\x00";

/// Template for recipe generation; the labels here are what the parser keys on.
pub const RECIPE_TEMPLATE: &str = "Generate a structured recipe in the following format:\n\n\
Title: <Recipe Title>\n\
Description: <Brief description>\n\
Ingredients:\n- <Ingredient 1>\n- <Ingredient 2>\n- <Ingredient 3>\n\
Instructions:\n1. <Step 1>\n2. <Step 2>\n3. <Step 3>\n\n\
Create a {spice_level} {cuisine} dish featuring {protein}. Be concise and clear.";

/// Build a prompt string with variable substitution.
///
/// Replaces `{key}` placeholders in the template with values from `vars`.
/// Use `{{` to insert a literal `{` and `}}` to insert a literal `}`.
///
/// # Example
///
/// ```
/// use menu_builder::prompt::render;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("name".to_string(), "Alice".to_string())]);
/// let result = render("Hello {name}, here is JSON: {{\"key\": \"val\"}}", &vars);
/// assert_eq!(result, r#"Hello Alice, here is JSON: {"key": "val"}"#);
/// ```
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    // Pass 1: protect escaped braces
    let mut rendered = template.replace("{{", ESCAPE_SENTINEL);
    rendered = rendered.replace("}}", ESCAPE_SENTINEL_CLOSE);

    // Pass 2: substitute placeholders
    for (key, value) in vars {
        let placeholder = format!("{{{}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }

    // Pass 3: restore escaped braces
    rendered = rendered.replace(ESCAPE_SENTINEL, "{");
    rendered = rendered.replace(ESCAPE_SENTINEL_CLOSE, "}");
    rendered
}

/// Template variables for a recipe request.
pub fn recipe_vars(request: &RecipeRequest) -> HashMap<String, String> {
    HashMap::from([
        ("cuisine".to_string(), request.cuisine.to_string()),
        ("protein".to_string(), request.protein.to_string()),
        ("spice_level".to_string(), request.spice_level.to_string()),
    ])
}

/// The full generation prompt for a recipe request.
pub fn recipe_prompt(request: &RecipeRequest) -> String {
    render(RECIPE_TEMPLATE, &recipe_vars(request))
}

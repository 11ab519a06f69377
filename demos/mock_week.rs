//! Fill a week from the mock backend and print the menu and grocery list.
//!
//! ```sh
//! cargo run --example mock_week
//! ```

use menu_builder::export::{render_grocery_list, render_menu};
use menu_builder::{
    aggregate_ingredients, Cuisine, Day, ExecCtx, MealSlot, MockBackend, Protein,
    RecipeGenerator, RecipeRequest, SpiceLevel, WeeklyPlan,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    menu_builder::logging::init_logging(0);

    let ctx = ExecCtx::builder("http://unused")
        .backend(Arc::new(MockBackend::sample_recipe()))
        .build()?;
    let generator = RecipeGenerator::new();

    let mut plan = WeeklyPlan::new();
    for (i, day) in Day::ALL.iter().copied().enumerate() {
        if day == Day::Friday {
            plan.set_eat_out(day, true);
            continue;
        }
        let cuisine = Cuisine::ALL[i % Cuisine::ALL.len()];
        let request = RecipeRequest::new(cuisine, Protein::Chicken, SpiceLevel::Mild);
        let recipe = generator.generate(&ctx, &request).await;
        plan.apply_generated(day, MealSlot::Dinner, &request, recipe);
    }

    let lunch = plan.meal_mut(Day::Monday, MealSlot::Lunch);
    lunch.title = "Leftover Sandwich".to_string();
    lunch.set_ingredients_text("2 slices bread\n\nsome mustard");

    println!("{}", render_menu(&plan));
    println!("{}", render_grocery_list(&aggregate_ingredients(&plan)));
    Ok(())
}

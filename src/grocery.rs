//! Grocery list aggregation across a week of meals.
//!
//! Each ingredient line is read as `<quantity> <name>`. Lines that fit are
//! summed by normalized name; everything else lands in the unmatched bucket
//! untouched apart from trimming and case folding. Only the first token is
//! ever treated as a quantity, so `"1 1/2 cups rice"` sums under
//! `"1/2 cups rice"` and `"1/2 cup milk"` is unmatched.

use crate::plan::{MealSlot, WeeklyPlan};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated groceries for a week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroceryList {
    /// Summed quantity per normalized ingredient name.
    pub items: BTreeMap<String, f64>,
    /// Normalized lines without a leading quantity; duplicates kept.
    pub unmatched: Vec<String>,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.unmatched.is_empty()
    }

    /// Fold one ingredient line into the list. Blank lines are skipped.
    pub fn add_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        match split_quantity(trimmed) {
            Some((quantity, name)) => {
                *self.items.entry(name.to_lowercase()).or_insert(0.0) += quantity;
            }
            None => self.unmatched.push(trimmed.to_lowercase()),
        }
    }
}

/// Split a trimmed line into a leading finite number and the trimmed remainder.
fn split_quantity(line: &str) -> Option<(f64, &str)> {
    let (first, rest) = line.split_once(char::is_whitespace)?;
    let quantity: f64 = first.parse().ok()?;
    let name = rest.trim();
    if !quantity.is_finite() || name.is_empty() {
        return None;
    }
    Some((quantity, name))
}

/// Aggregate every ingredient line of the week's planned meals.
///
/// Days marked eat-out are skipped entirely, whatever their meals still hold.
/// Traversal is Monday to Sunday, lunch before dinner.
///
/// # Example
///
/// ```
/// use menu_builder::grocery::aggregate_ingredients;
/// use menu_builder::plan::{Day, MealSlot, WeeklyPlan};
///
/// let mut plan = WeeklyPlan::new();
/// plan.meal_mut(Day::Monday, MealSlot::Lunch).ingredients =
///     vec!["2 Eggs".into(), "butter".into()];
/// plan.meal_mut(Day::Friday, MealSlot::Dinner).ingredients = vec!["1 eggs".into()];
///
/// let list = aggregate_ingredients(&plan);
/// assert_eq!(list.items["eggs"], 3.0);
/// assert_eq!(list.unmatched, vec!["butter"]);
/// ```
pub fn aggregate_ingredients(plan: &WeeklyPlan) -> GroceryList {
    let mut list = GroceryList::default();

    for (_, day) in plan.iter().filter(|(_, d)| !d.eat_out) {
        for slot in MealSlot::ALL {
            for line in &day.meal(slot).ingredients {
                list.add_line(line);
            }
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Day;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn all_eat_out() -> WeeklyPlan {
        let mut plan = WeeklyPlan::new();
        for day in Day::ALL {
            plan.set_eat_out(day, true);
        }
        plan
    }

    #[test]
    fn test_monday_tuesday_scenario() {
        let mut plan = all_eat_out();
        plan.set_eat_out(Day::Monday, false);
        plan.set_eat_out(Day::Tuesday, false);
        plan.meal_mut(Day::Monday, MealSlot::Lunch).ingredients =
            lines(&["2 cups flour", "1 egg", "pinch of salt"]);
        plan.meal_mut(Day::Tuesday, MealSlot::Dinner).ingredients = lines(&["2 cups flour"]);

        let list = aggregate_ingredients(&plan);

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items["cups flour"], 4.0);
        assert_eq!(list.items["egg"], 1.0);
        assert_eq!(list.unmatched, vec!["pinch of salt"]);
    }

    #[test]
    fn test_eat_out_day_contributes_nothing() {
        let mut plan = WeeklyPlan::new();
        plan.meal_mut(Day::Thursday, MealSlot::Lunch).ingredients = lines(&["3 apples", "honey"]);
        plan.meal_mut(Day::Thursday, MealSlot::Dinner).ingredients = lines(&["1 lemon"]);
        plan.set_eat_out(Day::Thursday, true);

        let list = aggregate_ingredients(&plan);
        assert!(list.is_empty());
    }

    #[test]
    fn test_name_normalization_merges_entries() {
        let mut plan = WeeklyPlan::new();
        plan.meal_mut(Day::Monday, MealSlot::Lunch).ingredients = lines(&["  1   Red Onion  "]);
        plan.meal_mut(Day::Sunday, MealSlot::Dinner).ingredients = lines(&["2\tred onion"]);

        let list = aggregate_ingredients(&plan);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items["red onion"], 3.0);
    }

    #[test]
    fn test_unmatched_keeps_full_line_and_duplicates() {
        let mut plan = WeeklyPlan::new();
        plan.meal_mut(Day::Monday, MealSlot::Lunch).ingredients =
            lines(&["Salt To Taste", "- 1 lb chicken", "salt to taste"]);

        let list = aggregate_ingredients(&plan);
        assert!(list.items.is_empty());
        assert_eq!(
            list.unmatched,
            vec!["salt to taste", "- 1 lb chicken", "salt to taste"]
        );
    }

    #[test]
    fn test_number_without_name_is_unmatched() {
        let mut list = GroceryList::default();
        list.add_line("2");
        list.add_line("  3   ");
        assert!(list.items.is_empty());
        assert_eq!(list.unmatched, vec!["2", "3"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut list = GroceryList::default();
        list.add_line("");
        list.add_line("   \t ");
        assert!(list.is_empty());
    }

    #[test]
    fn test_decimal_and_signed_quantities() {
        let mut list = GroceryList::default();
        list.add_line("0.5 cup milk");
        list.add_line("1.25 cup milk");
        list.add_line("+2 limes");
        assert!((list.items["cup milk"] - 1.75).abs() < 1e-9);
        assert_eq!(list.items["limes"], 2.0);
    }

    #[test]
    fn test_fraction_tokens_not_parsed() {
        let mut list = GroceryList::default();
        list.add_line("1/2 cup sugar");
        list.add_line("1 1/2 cups rice");
        assert_eq!(list.unmatched, vec!["1/2 cup sugar"]);
        assert_eq!(list.items["1/2 cups rice"], 1.0);
    }

    #[test]
    fn test_non_finite_tokens_unmatched() {
        let mut list = GroceryList::default();
        list.add_line("NaN bananas");
        list.add_line("inf noodles");
        assert!(list.items.is_empty());
        assert_eq!(list.unmatched, vec!["nan bananas", "inf noodles"]);
    }

    #[test]
    fn test_every_non_blank_line_accounted_once() {
        let mut plan = WeeklyPlan::new();
        let input = lines(&["1 a", "b", "", "2 c", "d e", "3 a"]);
        plan.meal_mut(Day::Saturday, MealSlot::Lunch).ingredients = input.clone();

        let list = aggregate_ingredients(&plan);
        let non_blank = input.iter().filter(|l| !l.trim().is_empty()).count();
        let summed_lines = 3; // "1 a", "2 c", "3 a"
        assert_eq!(list.unmatched.len() + summed_lines, non_blank);
        assert_eq!(list.items["a"], 4.0);
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let mut plan = WeeklyPlan::new();
        plan.meal_mut(Day::Monday, MealSlot::Dinner).ingredients = lines(&["1 egg", "rice"]);
        assert_eq!(aggregate_ingredients(&plan), aggregate_ingredients(&plan));
    }

    #[test]
    fn test_manually_entered_slot_aggregates() {
        let mut plan = WeeklyPlan::new();
        plan.meal_mut(Day::Monday, MealSlot::Lunch).ingredients = lines(&["2 eggs"]);
        plan.apply_manual(
            Day::Wednesday,
            MealSlot::Dinner,
            crate::plan::ManualMeal {
                title: Some("Omelette".into()),
                ingredients: Some("3 eggs\n\nhandful of chives\n".into()),
                ..Default::default()
            },
        );

        let list = aggregate_ingredients(&plan);
        assert_eq!(list.items["eggs"], 5.0);
        assert_eq!(list.unmatched, vec!["handful of chives"]);
    }
}

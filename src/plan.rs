//! The weekly plan: seven days, each with a lunch and a dinner slot.
//!
//! A [`WeeklyPlan`] is an ordinary value owned by whoever drives the planning
//! session. The aggregator and the exporters only ever borrow it.

use crate::error::{MenuError, Result};
use crate::types::{Recipe, RecipeRequest, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Days of the planning week, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Day::ALL
            .iter()
            .copied()
            .find(|d| {
                d.as_str().eq_ignore_ascii_case(wanted)
                    || (wanted.len() == 3 && d.as_str()[..3].eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| MenuError::InvalidConfig(format!("unknown day '{}'", wanted)))
    }
}

/// The two meal slots of a day, lunch first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 2] = [MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(MenuError::InvalidConfig(format!(
                "unknown meal slot '{}' (expected lunch or dinner)",
                other
            ))),
        }
    }
}

/// One meal slot's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    /// Cuisine last used to generate this meal; empty for manual entries.
    pub cuisine: String,
    /// Protein last used to generate this meal; empty for manual entries.
    pub protein: String,
    /// Sampling temperature last used (or to be used) for generation.
    pub creativity: f64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub ai_generated: bool,
}

impl Default for Meal {
    fn default() -> Self {
        Self {
            cuisine: String::new(),
            protein: String::new(),
            creativity: DEFAULT_TEMPERATURE,
            title: String::new(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: String::new(),
            ai_generated: false,
        }
    }
}

impl Meal {
    /// Replace the ingredient lines from a one-per-line text block.
    ///
    /// Splits on `\n` without filtering, so blank lines survive as empty
    /// entries; aggregation skips them.
    pub fn set_ingredients_text(&mut self, text: &str) {
        self.ingredients = text.split('\n').map(str::to_string).collect();
    }

    /// The ingredient lines as a single one-per-line block.
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join("\n")
    }

    /// Overwrite the given fields and mark the meal as hand-entered.
    ///
    /// The generation parameters are cleared; creativity is kept.
    pub fn apply_manual(&mut self, entry: ManualMeal) {
        if let Some(title) = entry.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = entry.description {
            self.description = description;
        }
        if let Some(ingredients) = entry.ingredients {
            self.set_ingredients_text(&ingredients);
        }
        if let Some(instructions) = entry.instructions {
            self.instructions = instructions;
        }
        self.cuisine.clear();
        self.protein.clear();
        self.ai_generated = false;
    }

    /// Whether nothing has been entered or generated for this slot.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.instructions.is_empty()
            && self.ingredients.iter().all(|i| i.trim().is_empty())
    }
}

/// Fields typed in by hand for one slot. `None` leaves the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualMeal {
    pub title: Option<String>,
    pub description: Option<String>,
    /// One ingredient per line.
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
}

/// A single day of the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    /// When set, neither meal is planned and the day contributes no groceries.
    pub eat_out: bool,
    pub lunch: Meal,
    pub dinner: Meal,
}

impl DayPlan {
    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn meal_mut(&mut self, slot: MealSlot) -> &mut Meal {
        match slot {
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }
}

/// A full planning week, Monday through Sunday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyPlan {
    days: [DayPlan; 7],
}

impl WeeklyPlan {
    /// A week with every day planned and every meal empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Day) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayPlan {
        &mut self.days[day.index()]
    }

    pub fn meal(&self, day: Day, slot: MealSlot) -> &Meal {
        self.day(day).meal(slot)
    }

    pub fn meal_mut(&mut self, day: Day, slot: MealSlot) -> &mut Meal {
        self.day_mut(day).meal_mut(slot)
    }

    pub fn set_eat_out(&mut self, day: Day, eat_out: bool) {
        self.day_mut(day).eat_out = eat_out;
    }

    /// Days paired with their plans, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayPlan)> {
        Day::ALL.iter().copied().zip(self.days.iter())
    }

    /// Store a generated recipe in a slot, recording how it was produced.
    pub fn apply_generated(
        &mut self,
        day: Day,
        slot: MealSlot,
        request: &RecipeRequest,
        recipe: Recipe,
    ) {
        let meal = self.meal_mut(day, slot);
        meal.cuisine = request.cuisine.to_string();
        meal.protein = request.protein.to_string();
        meal.creativity = request.temperature;
        meal.title = recipe.title;
        meal.description = recipe.description;
        meal.ingredients = recipe.ingredients;
        meal.instructions = recipe.instructions;
        meal.ai_generated = true;
    }

    /// Store hand-entered fields in a slot and return the updated meal.
    pub fn apply_manual(&mut self, day: Day, slot: MealSlot, entry: ManualMeal) -> &Meal {
        let meal = self.meal_mut(day, slot);
        meal.apply_manual(entry);
        meal
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read a plan file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match PlanFormat::from_path(path)? {
            PlanFormat::Json => Self::from_json(&text),
            #[cfg(feature = "yaml")]
            PlanFormat::Yaml => Self::from_yaml(&text),
        }
    }

    /// Write a plan file, choosing the format from its extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = match PlanFormat::from_path(path)? {
            PlanFormat::Json => self.to_json()?,
            #[cfg(feature = "yaml")]
            PlanFormat::Yaml => self.to_yaml()?,
        };
        std::fs::write(path, text)?;
        Ok(())
    }
}

enum PlanFormat {
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl PlanFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(PlanFormat::Json),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => Ok(PlanFormat::Yaml),
            _ => Err(MenuError::InvalidPlan(format!(
                "unsupported plan file extension: {}",
                path.display()
            ))),
        }
    }
}

// On disk a plan is a map keyed by day name; missing days load as empty.
impl Serialize for WeeklyPlan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, plan) in self.iter() {
            map.serialize_entry(day.as_str(), plan)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklyPlan {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PlanVisitor)
    }
}

struct PlanVisitor;

impl<'de> serde::de::Visitor<'de> for PlanVisitor {
    type Value = WeeklyPlan;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by day name")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<WeeklyPlan, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        use serde::de::Error;

        let mut plan = WeeklyPlan::new();
        let mut seen = [false; 7];
        while let Some(name) = access.next_key::<String>()? {
            let day = name.parse::<Day>().map_err(A::Error::custom)?;
            if std::mem::replace(&mut seen[day.index()], true) {
                return Err(A::Error::custom(format!("{} appears more than once", day)));
            }
            *plan.day_mut(day) = access.next_value()?;
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cuisine, Protein, SpiceLevel};

    #[test]
    fn test_new_plan_is_empty() {
        let plan = WeeklyPlan::new();
        for (_, day) in plan.iter() {
            assert!(!day.eat_out);
            assert!(day.lunch.is_empty());
            assert!(day.dinner.is_empty());
            assert!((day.lunch.creativity - 0.7).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_iter_canonical_order() {
        let plan = WeeklyPlan::new();
        let days: Vec<Day> = plan.iter().map(|(d, _)| d).collect();
        assert_eq!(days, Day::ALL.to_vec());
    }

    #[test]
    fn test_day_parsing() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Sun".parse::<Day>().unwrap(), Day::Sunday);
        assert!("Funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("LUNCH".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert!("brunch".parse::<MealSlot>().is_err());
    }

    #[test]
    fn test_apply_generated_records_parameters() {
        let mut plan = WeeklyPlan::new();
        let request = RecipeRequest::new(Cuisine::Japanese, Protein::Fish, SpiceLevel::Mild)
            .with_temperature(0.4)
            .unwrap();
        let recipe = Recipe {
            title: "Miso Salmon".into(),
            description: "Glazed and broiled.".into(),
            ingredients: vec!["2 salmon fillets".into()],
            instructions: "1. Broil.".into(),
        };

        plan.apply_generated(Day::Wednesday, MealSlot::Dinner, &request, recipe);

        let meal = plan.meal(Day::Wednesday, MealSlot::Dinner);
        assert!(meal.ai_generated);
        assert_eq!(meal.cuisine, "Japanese");
        assert_eq!(meal.protein, "Fish");
        assert!((meal.creativity - 0.4).abs() < f64::EPSILON);
        assert_eq!(meal.title, "Miso Salmon");
        assert_eq!(meal.ingredients, vec!["2 salmon fillets"]);
        assert!(plan.meal(Day::Wednesday, MealSlot::Lunch).is_empty());
    }

    #[test]
    fn test_set_ingredients_text_keeps_blank_lines() {
        let mut meal = Meal::default();
        meal.set_ingredients_text("1 egg\n\n2 cups flour");
        assert_eq!(meal.ingredients, vec!["1 egg", "", "2 cups flour"]);
        assert_eq!(meal.ingredients_text(), "1 egg\n\n2 cups flour");
    }

    #[test]
    fn test_json_round_trip_keys_by_day() {
        let mut plan = WeeklyPlan::new();
        plan.set_eat_out(Day::Friday, true);
        plan.meal_mut(Day::Monday, MealSlot::Lunch).title = "Caesar Salad".into();

        let json = plan.to_json().unwrap();
        assert!(json.contains("\"Friday\""));
        assert!(json.contains("\"eat_out\": true"));

        let restored = WeeklyPlan::from_json(&json).unwrap();
        assert_eq!(restored, plan);
    }

    #[test]
    fn test_partial_json_fills_missing_days() {
        let plan = WeeklyPlan::from_json(
            r#"{"Tuesday": {"eat_out": true}, "monday": {"lunch": {"ingredients": ["1 egg"]}}}"#,
        )
        .unwrap();
        assert!(plan.day(Day::Tuesday).eat_out);
        assert_eq!(plan.meal(Day::Monday, MealSlot::Lunch).ingredients, vec!["1 egg"]);
        assert!(!plan.day(Day::Sunday).eat_out);
    }

    #[test]
    fn test_apply_manual_overwrites_given_fields() {
        let mut plan = WeeklyPlan::new();
        let request = RecipeRequest::new(Cuisine::Mexican, Protein::Beef, SpiceLevel::Spicy);
        plan.apply_generated(Day::Thursday, MealSlot::Lunch, &request, Recipe::default());

        let meal = plan.apply_manual(
            Day::Thursday,
            MealSlot::Lunch,
            ManualMeal {
                title: Some(" Tacos ".into()),
                ingredients: Some("8 tortillas\n\n1 lb ground beef".into()),
                ..ManualMeal::default()
            },
        );

        assert_eq!(meal.title, "Tacos");
        assert_eq!(meal.ingredients, vec!["8 tortillas", "", "1 lb ground beef"]);
        assert_eq!(meal.description, "No description provided.");
        assert!(!meal.ai_generated);
        assert!(meal.cuisine.is_empty());
        assert!(meal.protein.is_empty());
    }

    #[test]
    fn test_apply_manual_empty_entry_leaves_slot_empty() {
        let mut plan = WeeklyPlan::new();
        let meal = plan.apply_manual(Day::Monday, MealSlot::Dinner, ManualMeal::default());
        assert!(meal.is_empty());
    }

    #[test]
    fn test_duplicate_day_key_rejected() {
        let err = WeeklyPlan::from_json(
            r#"{"Monday": {"eat_out": true}, "monday": {"eat_out": false}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Monday appears more than once"));
        assert!(WeeklyPlan::from_json(r#"{"Mon": {}, "MONDAY": {}}"#).is_err());
    }

    #[test]
    fn test_unknown_day_key_rejected() {
        assert!(WeeklyPlan::from_json(r#"{"Someday": {}}"#).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut plan = WeeklyPlan::new();
        plan.set_eat_out(Day::Saturday, true);

        plan.save(&path).unwrap();
        let loaded = WeeklyPlan::load(&path).unwrap();
        assert_eq!(loaded, plan);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            WeeklyPlan::load(&path),
            Err(MenuError::InvalidPlan(_))
        ));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_round_trip() {
        let mut plan = WeeklyPlan::new();
        plan.set_eat_out(Day::Thursday, true);
        let yaml = plan.to_yaml().unwrap();
        assert_eq!(WeeklyPlan::from_yaml(&yaml).unwrap(), plan);
    }
}

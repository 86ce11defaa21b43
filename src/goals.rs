//! Goal-based meal filtering
//!
//! Filters and orders one catalog bucket by a nutrition goal and keeps the
//! first three results.

use crate::catalog::FoodCatalog;
use crate::types::{FoodItem, MealType};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bucket used when the caller names no meal type
pub const DEFAULT_GOAL_MEAL_TYPE: &str = "lunch";
/// Maximum number of meals returned
pub const MAX_GOAL_MEALS: usize = 3;
/// Calorie line separating weight-loss and weight-gain meals (kcal)
pub const CALORIE_PIVOT: f64 = 350.0;
/// Minimum protein for muscle-gain meals (g)
pub const MUSCLE_GAIN_MIN_PROTEIN: f64 = 15.0;

/// Recognized nutrition goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionGoal {
    WeightLoss,
    WeightGain,
    MuscleGain,
}

impl NutritionGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionGoal::WeightLoss => "weight_loss",
            NutritionGoal::WeightGain => "weight_gain",
            NutritionGoal::MuscleGain => "muscle_gain",
        }
    }

    pub fn parse(goal: &str) -> Option<NutritionGoal> {
        match goal {
            "weight_loss" => Some(NutritionGoal::WeightLoss),
            "weight_gain" => Some(NutritionGoal::WeightGain),
            "muscle_gain" => Some(NutritionGoal::MuscleGain),
            _ => None,
        }
    }
}

/// Bucket for a goal request. Any key other than an exact bucket name,
/// including typos of "breakfast", falls through to snacks.
pub fn goal_meal_type(meal_type: &str) -> MealType {
    MealType::from_key(meal_type).unwrap_or_else(|| {
        tracing::warn!(meal_type, "unrecognized meal type, using snacks");
        MealType::Snacks
    })
}

/// Goal filter over catalog buckets
pub struct GoalFilter;

impl GoalFilter {
    /// Filter and order `meal_type`'s bucket for `goal`.
    ///
    /// Unknown goals pass the bucket through unchanged.
    pub fn apply(catalog: &FoodCatalog, goal: &str, meal_type: Option<&str>) -> Vec<FoodItem> {
        let bucket = goal_meal_type(meal_type.unwrap_or(DEFAULT_GOAL_MEAL_TYPE));
        let meals = catalog.bucket(bucket);

        let mut selected: Vec<FoodItem> = match NutritionGoal::parse(goal) {
            Some(NutritionGoal::WeightLoss) => {
                let mut kept = filtered(meals, |m| m.calories < CALORIE_PIVOT);
                kept.sort_by(|a, b| compare(a.calories, b.calories));
                kept
            }
            Some(NutritionGoal::WeightGain) => {
                let mut kept = filtered(meals, |m| m.calories > CALORIE_PIVOT);
                kept.sort_by(|a, b| compare(b.calories, a.calories));
                kept
            }
            Some(NutritionGoal::MuscleGain) => {
                let mut kept = filtered(meals, |m| m.protein >= MUSCLE_GAIN_MIN_PROTEIN);
                kept.sort_by(|a, b| compare(b.protein, a.protein));
                kept
            }
            None => {
                tracing::debug!(goal, "unrecognized goal, returning bucket unchanged");
                meals.to_vec()
            }
        };

        selected.truncate(MAX_GOAL_MEALS);
        selected
    }
}

fn filtered(meals: &[FoodItem], keep: impl Fn(&FoodItem) -> bool) -> Vec<FoodItem> {
    meals.iter().filter(|m| keep(*m)).cloned().collect()
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn food(name: &str, calories: f64, protein: f64) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            local_name: String::new(),
            calories,
            protein,
            carbs: None,
            fat: None,
            fiber: None,
            best_for: String::new(),
            benefits: vec![],
        }
    }

    fn fixture() -> FoodCatalog {
        FoodCatalog {
            breakfast: vec![food("porridge", 240.0, 8.0)],
            lunch: vec![
                food("dal bhat", 550.0, 18.0),
                food("gundruk", 220.0, 12.0),
                food("kwati", 310.0, 19.0),
                food("curry", 620.0, 32.0),
                food("salad", 150.0, 4.0),
                food("paneer", 450.0, 22.0),
                food("soup", 150.0, 6.0),
            ],
            dinner: vec![],
            snacks: vec![food("peanuts", 280.0, 12.0), food("lassi", 180.0, 8.0)],
        }
    }

    fn names(items: &[FoodItem]) -> Vec<&str> {
        items.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_weight_loss_sorts_ascending() {
        let meals = GoalFilter::apply(&fixture(), "weight_loss", None);
        // salad and soup tie; catalog order is kept
        assert_eq!(names(&meals), vec!["salad", "soup", "gundruk"]);
    }

    #[test]
    fn test_weight_gain_sorts_descending() {
        let meals = GoalFilter::apply(&fixture(), "weight_gain", Some("lunch"));
        assert_eq!(names(&meals), vec!["curry", "dal bhat", "paneer"]);
    }

    #[test]
    fn test_muscle_gain_sorts_by_protein() {
        let meals = GoalFilter::apply(&fixture(), "muscle_gain", Some("lunch"));
        assert_eq!(names(&meals), vec!["curry", "paneer", "kwati"]);
        assert!(meals.iter().all(|m| m.protein >= 15.0));
    }

    #[test]
    fn test_unknown_goal_passes_through() {
        let meals = GoalFilter::apply(&fixture(), "bulk", Some("lunch"));
        assert_eq!(names(&meals), vec!["dal bhat", "gundruk", "kwati"]);
    }

    #[test]
    fn test_unknown_meal_type_falls_back_to_snacks() {
        let meals = GoalFilter::apply(&fixture(), "weight_loss", Some("Breakfast"));
        assert_eq!(names(&meals), vec!["lassi", "peanuts"]);

        assert_eq!(goal_meal_type("brekfast"), MealType::Snacks);
        assert_eq!(goal_meal_type("breakfast"), MealType::Breakfast);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let meals = GoalFilter::apply(&fixture(), "weight_gain", Some("breakfast"));
        assert!(meals.is_empty());
    }

    #[test]
    fn test_goal_names_round_trip() {
        for goal in [
            NutritionGoal::WeightLoss,
            NutritionGoal::WeightGain,
            NutritionGoal::MuscleGain,
        ] {
            assert_eq!(NutritionGoal::parse(goal.as_str()), Some(goal));
        }
        assert_eq!(NutritionGoal::parse("Weight_Loss"), None);
    }
}

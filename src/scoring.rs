//! Meal scoring
//!
//! This module picks the meal-type bucket for a session and ranks its items:
//! - Bucket selection from the time-of-day label and the local hour
//! - Integer point scoring per candidate (protein, calorie proximity, tags, focus)
//! - Stable descending sort, top three kept

use crate::types::{FoodItem, MealRecommendations, MealType, RecoveryFocus, RecoveryNeeds, ScoredMeal};

/// Number of meals kept after ranking
pub const TOP_MEALS: usize = 3;

/// Choose the bucket for a session.
///
/// Each label only short-circuits its own branch; otherwise the local hour
/// decides (before 11 breakfast, before 16 lunch, later dinner).
pub fn meal_type_for(time_of_day: &str, hour: u32) -> MealType {
    if time_of_day == "morning" || hour < 11 {
        MealType::Breakfast
    } else if time_of_day == "afternoon" || (11..16).contains(&hour) {
        MealType::Lunch
    } else if time_of_day == "evening" || hour >= 16 {
        MealType::Dinner
    } else {
        MealType::Snacks
    }
}

/// Scorer for ranking catalog items against recovery needs
pub struct MealScorer;

impl MealScorer {
    /// Score a single candidate
    pub fn score(item: &FoodItem, needs: &RecoveryNeeds) -> i32 {
        let mut score = 0;

        score += protein_points(item, needs);
        score += calorie_points(item, needs);

        // Both checks run; a single `bestFor` value can satisfy at most one
        if item.best_for == "post-yoga" {
            score += 2;
        }
        if item.best_for == "recovery" {
            score += 2;
        }

        if needs.has_focus(RecoveryFocus::MuscleRecovery) && item.protein >= 15.0 {
            score += 2;
        }
        if needs.has_focus(RecoveryFocus::JointHealth) && item.has_benefit_containing("fiber") {
            score += 1;
        }

        score
    }

    /// Score every item of a bucket and keep the best three.
    ///
    /// Items are cloned, so scores never leak back into the catalog.
    pub fn select(candidates: &[FoodItem], needs: &RecoveryNeeds) -> MealRecommendations {
        let mut scored: Vec<ScoredMeal> = candidates
            .iter()
            .map(|item| {
                let score = Self::score(item, needs);
                tracing::trace!(meal = %item.name, score, "scored candidate");
                ScoredMeal {
                    item: item.clone(),
                    score,
                }
            })
            .collect();

        // stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(TOP_MEALS);

        MealRecommendations {
            primary: scored.first().cloned(),
            alternatives: scored.iter().skip(1).cloned().collect(),
            all_options: scored,
        }
    }
}

fn protein_points(item: &FoodItem, needs: &RecoveryNeeds) -> i32 {
    if needs.protein >= 15 && item.protein >= 15.0 {
        3
    } else if needs.protein >= 12 && item.protein >= 10.0 {
        2
    } else {
        0
    }
}

fn calorie_points(item: &FoodItem, needs: &RecoveryNeeds) -> i32 {
    let distance = (item.calories - needs.calories as f64).abs();

    if distance < 50.0 {
        3
    } else if distance < 100.0 {
        2
    } else if distance < 150.0 {
        1
    } else {
        0
    }
}

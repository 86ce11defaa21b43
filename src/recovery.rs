//! Recovery needs derivation
//!
//! Derives post-session targets from session metrics and the demand profile.
//! Focus tags accumulate independently in a fixed evaluation order:
//! muscle recovery, energy restoration, joint health, brain health.

use crate::types::{DemandProfile, RecoveryFocus, RecoveryNeeds};

/// Recovery surplus applied to calories burned
pub const CALORIE_SURPLUS_FACTOR: f64 = 1.2;
/// Protein target (g) after strength-heavy sessions
pub const HIGH_PROTEIN_G: u32 = 20;
/// Protein target (g) otherwise
pub const MODERATE_PROTEIN_G: u32 = 12;
/// Carbohydrate target (g) after long or intense sessions
pub const HIGH_CARBS_G: u32 = 50;
/// Carbohydrate target (g) otherwise
pub const MODERATE_CARBS_G: u32 = 30;
/// Minutes of practice per liter of hydration
pub const MINUTES_PER_LITER: f64 = 15.0;

/// Demand count a category must exceed to add its focus tag
const DEMAND_THRESHOLD: u32 = 2;
const HIGH_CARB_CALORIES: f64 = 150.0;
const HIGH_CARB_MINUTES: f64 = 30.0;

/// Calculator for post-session recovery needs
pub struct RecoveryCalculator;

impl RecoveryCalculator {
    /// Derive recovery needs from session metrics and demand profile
    pub fn calculate(
        calories_burned: f64,
        duration_minutes: f64,
        profile: &DemandProfile,
    ) -> RecoveryNeeds {
        let mut focus_tags = Vec::new();

        let calories = round_half_up(calories_burned * CALORIE_SURPLUS_FACTOR);

        let protein = if profile.strength > DEMAND_THRESHOLD {
            focus_tags.push(RecoveryFocus::MuscleRecovery);
            HIGH_PROTEIN_G
        } else {
            MODERATE_PROTEIN_G
        };

        let carbs = if calories_burned > HIGH_CARB_CALORIES || duration_minutes > HIGH_CARB_MINUTES
        {
            focus_tags.push(RecoveryFocus::EnergyRestoration);
            HIGH_CARBS_G
        } else {
            MODERATE_CARBS_G
        };

        let hydration_liters = (duration_minutes / MINUTES_PER_LITER).ceil() as i64;

        if profile.flexibility > DEMAND_THRESHOLD {
            focus_tags.push(RecoveryFocus::JointHealth);
        }
        if profile.balance > DEMAND_THRESHOLD {
            focus_tags.push(RecoveryFocus::BrainHealth);
        }

        let needs = RecoveryNeeds {
            calories,
            protein,
            carbs,
            hydration_liters,
            focus_tags,
        };

        tracing::debug!(
            calories = needs.calories,
            protein = needs.protein,
            carbs = needs.carbs,
            hydration_liters = needs.hydration_liters,
            tags = needs.focus_tags.len(),
            "derived recovery needs"
        );

        needs
    }
}

/// Round to the nearest integer with halves going toward positive infinity
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

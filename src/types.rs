//! Core types for the Yoga Fuel recommendation pipeline
//!
//! This module defines the records that flow through each stage of the
//! pipeline: the caller's session descriptor, the derived demand profile and
//! recovery needs, scored meals, and the reports handed back to callers.
//! Every record is JSON-serializable with camelCase field names.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the four fixed meal-type partitions of the food catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    /// All buckets in catalog concatenation order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snacks => "snacks",
        }
    }

    /// Exact, case-sensitive key lookup. `"Breakfast"` is not a bucket.
    pub fn from_key(key: &str) -> Option<MealType> {
        MealType::ALL.into_iter().find(|m| m.as_str() == key)
    }
}

/// Catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Display name
    pub name: String,
    /// Localized name (matched case-sensitively by search)
    #[serde(default)]
    pub local_name: String,
    /// Energy (kcal)
    #[serde(default)]
    pub calories: f64,
    /// Protein (g)
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Fat (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Fiber (g). Informational only; scoring looks at `benefits` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Free-form usage tag, e.g. "post-yoga", "recovery", "pre-yoga"
    #[serde(default)]
    pub best_for: String,
    /// Free-form descriptive tags
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl FoodItem {
    /// True if any benefit tag contains `needle` as a substring
    pub fn has_benefit_containing(&self, needle: &str) -> bool {
        self.benefits.iter().any(|b| b.contains(needle))
    }
}

/// A single performed pose as reported by the caller.
///
/// Decoding never fails: anything that is not an object with a string
/// `poseName` becomes an entry without a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose_name: Option<String>,
}

impl PoseEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            pose_name: Some(name.into()),
        }
    }
}

impl<'de> Deserialize<'de> for PoseEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(pose_from_value(&value))
    }
}

fn pose_from_value(value: &Value) -> PoseEntry {
    PoseEntry {
        pose_name: value
            .get("poseName")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Default time-of-day label when the caller supplies none
pub const DEFAULT_TIME_OF_DAY: &str = "morning";

/// Caller-supplied description of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    /// Calories burned (kcal)
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories_burned: f64,
    /// Session length (minutes)
    #[serde(default, alias = "duration", deserialize_with = "lenient_number")]
    pub duration_minutes: f64,
    /// Pose accuracy (0-100)
    #[serde(default, deserialize_with = "lenient_number")]
    pub accuracy: f64,
    /// "morning", "afternoon", "evening" or any other label
    #[serde(
        default = "default_time_of_day",
        deserialize_with = "lenient_time_of_day"
    )]
    pub time_of_day: String,
    /// Poses performed during the session
    #[serde(default, deserialize_with = "lenient_poses")]
    pub poses: Vec<PoseEntry>,
}

impl Default for SessionDescriptor {
    fn default() -> Self {
        Self {
            calories_burned: 0.0,
            duration_minutes: 0.0,
            accuracy: 0.0,
            time_of_day: default_time_of_day(),
            poses: Vec::new(),
        }
    }
}

fn default_time_of_day() -> String {
    DEFAULT_TIME_OF_DAY.to_string()
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or(0.0))
}

fn lenient_time_of_day<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => s,
        _ => default_time_of_day(),
    })
}

fn lenient_poses<'de, D>(deserializer: D) -> Result<Vec<PoseEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(pose_from_value).collect(),
        _ => Vec::new(),
    })
}

/// Physical-demand category of a pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusCategory {
    Flexibility,
    Strength,
    Balance,
    Cardio,
}

impl FocusCategory {
    /// Iteration order used for counting and for primary-focus tie-breaks
    pub const ORDER: [FocusCategory; 4] = [
        FocusCategory::Flexibility,
        FocusCategory::Strength,
        FocusCategory::Balance,
        FocusCategory::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusCategory::Flexibility => "flexibility",
            FocusCategory::Strength => "strength",
            FocusCategory::Balance => "balance",
            FocusCategory::Cardio => "cardio",
        }
    }
}

/// Per-session counts of keyword matches for each demand category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandProfile {
    pub flexibility: u32,
    pub strength: u32,
    pub balance: u32,
    pub cardio: u32,
    /// At most one entry; empty when every count is zero
    pub primary_focus: Vec<FocusCategory>,
}

impl DemandProfile {
    pub fn count(&self, category: FocusCategory) -> u32 {
        match category {
            FocusCategory::Flexibility => self.flexibility,
            FocusCategory::Strength => self.strength,
            FocusCategory::Balance => self.balance,
            FocusCategory::Cardio => self.cardio,
        }
    }

    pub fn primary(&self) -> Option<FocusCategory> {
        self.primary_focus.first().copied()
    }

    pub fn is_focused_on(&self, category: FocusCategory) -> bool {
        self.primary_focus.contains(&category)
    }
}

/// Recovery focus tags attached to derived needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryFocus {
    MuscleRecovery,
    EnergyRestoration,
    JointHealth,
    BrainHealth,
}

impl RecoveryFocus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryFocus::MuscleRecovery => "muscle-recovery",
            RecoveryFocus::EnergyRestoration => "energy-restoration",
            RecoveryFocus::JointHealth => "joint-health",
            RecoveryFocus::BrainHealth => "brain-health",
        }
    }
}

/// Post-session nutrient and hydration targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryNeeds {
    /// Target energy (kcal)
    pub calories: i64,
    /// Target protein (g), 12 or 20
    pub protein: u32,
    /// Target carbohydrates (g), 30 or 50
    pub carbs: u32,
    /// Target hydration (liters)
    pub hydration_liters: i64,
    /// Tags in evaluation order
    pub focus_tags: Vec<RecoveryFocus>,
}

impl RecoveryNeeds {
    pub fn has_focus(&self, focus: RecoveryFocus) -> bool {
        self.focus_tags.contains(&focus)
    }
}

/// A catalog item enriched with its score for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMeal {
    #[serde(flatten)]
    pub item: FoodItem,
    pub score: i32,
}

/// Ranked short list for the selected bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<ScoredMeal>,
    pub alternatives: Vec<ScoredMeal>,
    pub all_options: Vec<ScoredMeal>,
}

/// Echo of the session metrics used for a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub calories_burned: f64,
    pub duration_minutes: f64,
    pub accuracy: f64,
    pub pose_types: Vec<FocusCategory>,
}

/// Result of a post-session recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSessionReport {
    pub session_summary: SessionSummary,
    pub recovery_needs: RecoveryNeeds,
    pub recommendations: MealRecommendations,
    pub message: String,
}

/// Lead-time band before a scheduled session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadTimeTier {
    /// More than two hours out
    FullMeal,
    /// Between one and two hours out
    LightMeal,
    /// One hour or less, or already started
    VeryLight,
}

/// Result of a pre-session recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSessionReport {
    /// Rounded minutes until the session (negative if already past)
    pub minutes_until: i64,
    pub tier: LeadTimeTier,
    pub message: String,
    pub recommendations: Vec<FoodItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_descriptor_defaults() {
        let session: SessionDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(session, SessionDescriptor::default());
        assert_eq!(session.time_of_day, "morning");
    }

    #[test]
    fn test_session_descriptor_is_lenient() {
        let session: SessionDescriptor = serde_json::from_str(
            r#"{
                "caloriesBurned": "180",
                "duration": 35,
                "accuracy": null,
                "timeOfDay": "",
                "poses": [{"poseName": "Tree"}, {"poseName": 7}, "plank", null, {}]
            }"#,
        )
        .unwrap();

        assert_eq!(session.calories_burned, 180.0);
        assert_eq!(session.duration_minutes, 35.0);
        assert_eq!(session.accuracy, 0.0);
        assert_eq!(session.time_of_day, "morning");
        assert_eq!(session.poses.len(), 5);
        assert_eq!(session.poses[0], PoseEntry::named("Tree"));
        assert!(session.poses[1..].iter().all(|p| p.pose_name.is_none()));
    }

    #[test]
    fn test_null_pose_list_is_empty() {
        let session: SessionDescriptor =
            serde_json::from_str(r#"{"poses": null, "durationMinutes": 20}"#).unwrap();
        assert!(session.poses.is_empty());
        assert_eq!(session.duration_minutes, 20.0);
    }

    #[test]
    fn test_meal_type_keys_are_exact() {
        assert_eq!(MealType::from_key("dinner"), Some(MealType::Dinner));
        assert_eq!(MealType::from_key("Dinner"), None);
        assert_eq!(MealType::from_key("brekfast"), None);
    }

    #[test]
    fn test_food_item_optional_fields_omitted() {
        let item: FoodItem =
            serde_json::from_str(r#"{"name": "Kwati", "calories": 310, "protein": 19}"#).unwrap();
        assert_eq!(item.best_for, "");
        assert!(item.benefits.is_empty());

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("carbs").is_none());
        assert_eq!(json["localName"], "");
        assert_eq!(json["bestFor"], "");
    }

    #[test]
    fn test_scored_meal_flattens_item() {
        let meal = ScoredMeal {
            item: FoodItem {
                name: "Lassi".to_string(),
                local_name: "लस्सी".to_string(),
                calories: 180.0,
                protein: 8.0,
                carbs: None,
                fat: None,
                fiber: None,
                best_for: "recovery".to_string(),
                benefits: vec!["probiotic".to_string()],
            },
            score: 5,
        };

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["name"], "Lassi");
        assert_eq!(json["bestFor"], "recovery");
        assert_eq!(json["score"], 5);
    }

    #[test]
    fn test_recovery_focus_serializes_kebab_case() {
        let json = serde_json::to_string(&RecoveryFocus::MuscleRecovery).unwrap();
        assert_eq!(json, "\"muscle-recovery\"");
        assert_eq!(RecoveryFocus::JointHealth.as_str(), "joint-health");
    }
}

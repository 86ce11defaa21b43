//! Pipeline orchestration
//!
//! This module provides the public API for Yoga Fuel.
//! It wires the stages together: pose classification → recovery needs →
//! bucket selection → meal scoring, plus the independent pre-session, goal,
//! search, and catalog entry points.

use std::sync::Arc;

use chrono::Timelike;

use crate::catalog::{CatalogView, FoodCatalog};
use crate::clock::{Clock, SystemClock};
use crate::error::RecommendError;
use crate::goals::GoalFilter;
use crate::message::post_session_message;
use crate::poses::PoseClassifier;
use crate::pre_session::{parse_scheduled_time, PreSessionAdvisor};
use crate::recovery::RecoveryCalculator;
use crate::scoring::{meal_type_for, MealScorer};
use crate::search::search_foods;
use crate::types::{FoodItem, PostSessionReport, PreSessionReport, SessionDescriptor, SessionSummary};

/// Recommendation engine bound to a catalog and a clock.
///
/// Holds no mutable state; one instance can serve concurrent callers.
#[derive(Clone)]
pub struct MealRecommender {
    catalog: Arc<FoodCatalog>,
    clock: Arc<dyn Clock>,
}

impl MealRecommender {
    /// Create a recommender over `catalog` using the system clock
    pub fn new(catalog: FoodCatalog) -> Self {
        Self::with_clock(Arc::new(catalog), Arc::new(SystemClock))
    }

    /// Create a recommender with a shared catalog and an explicit clock
    pub fn with_clock(catalog: Arc<FoodCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    /// Create a recommender over the embedded catalog using the system clock
    pub fn builtin() -> Result<Self, RecommendError> {
        Ok(Self::new(FoodCatalog::builtin()?))
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Recommend recovery meals for a completed session.
    ///
    /// Stages:
    /// 1. PoseClassifier - Demand profile from performed poses
    /// 2. RecoveryCalculator - Nutrient and hydration targets
    /// 3. meal_type_for - Bucket from time-of-day label and local hour
    /// 4. MealScorer - Ranked top three of that bucket
    pub fn recommend_post_session(&self, session: &SessionDescriptor) -> PostSessionReport {
        let profile = PoseClassifier::classify(&session.poses);

        let recovery_needs = RecoveryCalculator::calculate(
            session.calories_burned,
            session.duration_minutes,
            &profile,
        );

        let hour = self.clock.now().hour();
        let meal_type = meal_type_for(&session.time_of_day, hour);
        let candidates = self.catalog.bucket(meal_type);
        if candidates.is_empty() {
            tracing::warn!(meal_type = meal_type.as_str(), "catalog bucket is empty");
        }
        tracing::debug!(
            time_of_day = %session.time_of_day,
            hour,
            meal_type = meal_type.as_str(),
            "selected meal bucket"
        );

        let recommendations = MealScorer::select(candidates, &recovery_needs);
        let message = post_session_message(session.calories_burned, session.accuracy, &profile);

        PostSessionReport {
            session_summary: SessionSummary {
                calories_burned: session.calories_burned,
                duration_minutes: session.duration_minutes,
                accuracy: session.accuracy,
                pose_types: profile.primary_focus.clone(),
            },
            recovery_needs,
            recommendations,
            message,
        }
    }

    /// Suggest light meals ahead of a session starting at `scheduled_time`
    pub fn recommend_pre_session(
        &self,
        scheduled_time: &str,
    ) -> Result<PreSessionReport, RecommendError> {
        let now = self.clock.now();
        let scheduled = parse_scheduled_time(scheduled_time, self.clock.as_ref())?;
        Ok(PreSessionAdvisor::advise(&self.catalog, scheduled, now))
    }

    /// Up to three meals of a bucket ordered for a nutrition goal.
    ///
    /// `meal_type` defaults to lunch.
    pub fn recommend_by_goal(&self, goal: &str, meal_type: Option<&str>) -> Vec<FoodItem> {
        GoalFilter::apply(&self.catalog, goal, meal_type)
    }

    /// Substring search over every bucket
    pub fn search_foods(&self, query: &str) -> Vec<FoodItem> {
        search_foods(&self.catalog, query)
    }

    /// Whole catalog, or one bucket when `category` is given
    pub fn get_catalog(&self, category: Option<&str>) -> CatalogView {
        self.catalog.view(category)
    }
}

/// Recommend post-session meals for a session descriptor in JSON form.
///
/// Uses the embedded catalog and the system clock.
///
/// # Example
/// ```ignore
/// let report = post_session_to_json(
///     r#"{"caloriesBurned": 200, "duration": 40, "poses": [{"poseName": "plank"}]}"#
///         .to_string(),
/// )?;
/// ```
pub fn post_session_to_json(session_json: String) -> Result<String, RecommendError> {
    let session: SessionDescriptor = serde_json::from_str(&session_json)?;
    let report = MealRecommender::builtin()?.recommend_post_session(&session);
    Ok(serde_json::to_string(&report)?)
}

/// Pre-session suggestions as JSON for an ISO-8601 start time
pub fn pre_session_to_json(scheduled_time: String) -> Result<String, RecommendError> {
    let report = MealRecommender::builtin()?.recommend_pre_session(&scheduled_time)?;
    Ok(serde_json::to_string(&report)?)
}

/// Goal-filtered meals as a JSON array
pub fn goal_meals_to_json(goal: String, meal_type: Option<String>) -> Result<String, RecommendError> {
    let meals = MealRecommender::builtin()?.recommend_by_goal(&goal, meal_type.as_deref());
    Ok(serde_json::to_string(&meals)?)
}

/// Search results as a JSON array. An empty query is rejected.
pub fn search_foods_to_json(query: String) -> Result<String, RecommendError> {
    if query.is_empty() {
        return Err(RecommendError::MissingField("query".to_string()));
    }
    let results = MealRecommender::builtin()?.search_foods(&query);
    Ok(serde_json::to_string(&results)?)
}

/// Catalog (or one bucket) as JSON
pub fn catalog_to_json(category: Option<String>) -> Result<String, RecommendError> {
    let view = MealRecommender::builtin()?.get_catalog(category.as_deref());
    Ok(serde_json::to_string(&view)?)
}

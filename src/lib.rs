//! Yoga Fuel - Rule-based meal recommendations for yoga sessions
//!
//! Yoga Fuel turns session telemetry into ranked meal suggestions from a fixed,
//! categorized food catalog through a deterministic pipeline: pose
//! classification → recovery needs → meal bucket selection → meal scoring.
//!
//! ## Entry points
//!
//! - **Post-session**: ranked recovery meals for a completed session
//! - **Pre-session**: tiered light meals ahead of a scheduled session
//! - **Goals**: meals filtered and ordered for weight loss, weight gain, or muscle gain
//! - **Search / catalog**: substring search and raw catalog access
//!
//! The engine is stateless. The catalog and the clock are injected, so a single
//! [`MealRecommender`] can be shared across threads.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod goals;
pub mod message;
pub mod pipeline;
pub mod poses;
pub mod pre_session;
pub mod recovery;
pub mod scoring;
pub mod search;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use catalog::{CatalogView, FoodCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::RecommendError;
pub use goals::NutritionGoal;
pub use pipeline::{
    catalog_to_json, goal_meals_to_json, post_session_to_json, pre_session_to_json,
    search_foods_to_json, MealRecommender,
};
pub use types::{
    DemandProfile, FocusCategory, FoodItem, LeadTimeTier, MealRecommendations, MealType,
    PoseEntry, PostSessionReport, PreSessionReport, RecoveryFocus, RecoveryNeeds, ScoredMeal,
    SessionDescriptor, SessionSummary,
};

/// Yoga Fuel version
pub const FUEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "yoga-fuel";

//! Food catalog access
//!
//! Read-only access to the four meal-type buckets. The catalog is loaded once
//! (from the embedded data set or a caller-supplied JSON file) and never
//! mutated afterwards, so it can be shared freely across threads.

use crate::error::RecommendError;
use crate::types::{FoodItem, MealType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in catalog shipped with the crate
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../data/nepali_foods.json");

/// Catalog partitioned into the four meal-type buckets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodCatalog {
    #[serde(default)]
    pub breakfast: Vec<FoodItem>,
    #[serde(default)]
    pub lunch: Vec<FoodItem>,
    #[serde(default)]
    pub dinner: Vec<FoodItem>,
    #[serde(default)]
    pub snacks: Vec<FoodItem>,
}

/// Either one bucket or the whole catalog, as returned by [`FoodCatalog::view`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogView {
    Bucket(Vec<FoodItem>),
    Full(FoodCatalog),
}

impl FoodCatalog {
    /// Parse the embedded catalog
    pub fn builtin() -> Result<Self, RecommendError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, RecommendError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(RecommendError::CatalogError(
                "catalog must be an object keyed by meal type".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RecommendError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| {
            RecommendError::CatalogError(format!("{}: {}", path.display(), e))
        })
    }

    /// Items of one bucket, in catalog order
    pub fn bucket(&self, meal_type: MealType) -> &[FoodItem] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snacks => &self.snacks,
        }
    }

    /// All items: breakfast, lunch, dinner, then snacks
    pub fn all_foods(&self) -> impl Iterator<Item = &FoodItem> {
        MealType::ALL
            .into_iter()
            .flat_map(move |meal_type| self.bucket(meal_type).iter())
    }

    pub fn len(&self) -> usize {
        MealType::ALL.iter().map(|m| self.bucket(*m).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Catalog lookup by optional category key.
    ///
    /// No key returns the full catalog. An unknown key yields an empty bucket.
    pub fn view(&self, category: Option<&str>) -> CatalogView {
        match category {
            None => CatalogView::Full(self.clone()),
            Some(key) => match MealType::from_key(key) {
                Some(meal_type) => CatalogView::Bucket(self.bucket(meal_type).to_vec()),
                None => {
                    tracing::warn!(category = key, "unknown catalog category");
                    CatalogView::Bucket(Vec::new())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_every_bucket() {
        let catalog = FoodCatalog::builtin().unwrap();

        for meal_type in MealType::ALL {
            assert!(
                !catalog.bucket(meal_type).is_empty(),
                "{} bucket is empty",
                meal_type.as_str()
            );
        }
        assert!(catalog
            .all_foods()
            .all(|f| f.calories >= 0.0 && f.protein >= 0.0));
    }

    #[test]
    fn test_all_foods_concatenation_order() {
        let catalog = FoodCatalog::from_json(
            r#"{
                "snacks": [{"name": "S"}],
                "dinner": [{"name": "D"}],
                "breakfast": [{"name": "B1"}, {"name": "B2"}],
                "lunch": [{"name": "L"}]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = catalog.all_foods().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["B1", "B2", "L", "D", "S"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_missing_bucket_is_empty() {
        let catalog = FoodCatalog::from_json(r#"{"lunch": [{"name": "L"}]}"#).unwrap();
        assert!(catalog.bucket(MealType::Breakfast).is_empty());
        assert_eq!(catalog.bucket(MealType::Lunch).len(), 1);
    }

    #[test]
    fn test_rejects_non_object_catalog() {
        assert!(matches!(
            FoodCatalog::from_json("[]"),
            Err(RecommendError::CatalogError(_))
        ));
        assert!(matches!(
            FoodCatalog::from_json("not json"),
            Err(RecommendError::JsonError(_))
        ));
    }

    #[test]
    fn test_view_by_category() {
        let catalog = FoodCatalog::builtin().unwrap();

        match catalog.view(Some("dinner")) {
            CatalogView::Bucket(items) => assert_eq!(items, catalog.dinner),
            CatalogView::Full(_) => panic!("expected a single bucket"),
        }

        match catalog.view(Some("brunch")) {
            CatalogView::Bucket(items) => assert!(items.is_empty()),
            CatalogView::Full(_) => panic!("expected a single bucket"),
        }

        assert_eq!(catalog.view(None), CatalogView::Full(catalog.clone()));
    }

    #[test]
    fn test_full_view_serializes_as_object() {
        let catalog = FoodCatalog::builtin().unwrap();
        let json = serde_json::to_value(catalog.view(None)).unwrap();
        assert!(json["breakfast"].is_array());
        assert!(json["snacks"].is_array());
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let result = FoodCatalog::from_path("/nonexistent/catalog.json");
        assert!(matches!(result, Err(RecommendError::Io(_))));
    }
}

//! Food search across the whole catalog
//!
//! Display names match case-insensitively; localized names match
//! case-sensitively. Results keep catalog concatenation order and are not capped.

use crate::catalog::FoodCatalog;
use crate::types::FoodItem;

/// Find every item whose name or localized name contains `query`
pub fn search_foods(catalog: &FoodCatalog, query: &str) -> Vec<FoodItem> {
    let needle = query.to_lowercase();

    let results: Vec<FoodItem> = catalog
        .all_foods()
        .filter(|food| food.name.to_lowercase().contains(&needle) || food.local_name.contains(query))
        .cloned()
        .collect();

    tracing::debug!(query, matches = results.len(), "searched catalog");

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealType;
    use pretty_assertions::assert_eq;

    fn food(name: &str, local_name: &str) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            local_name: local_name.to_string(),
            calories: 100.0,
            protein: 5.0,
            carbs: None,
            fat: None,
            fiber: None,
            best_for: String::new(),
            benefits: vec![],
        }
    }

    fn fixture() -> FoodCatalog {
        FoodCatalog {
            breakfast: vec![food("Moong Dal Cheela", "मुगी दालको चिल्ला")],
            lunch: vec![food("Dal Bhat", "दाल भात"), food("Kwati", "क्वाटी")],
            dinner: vec![food("Sandal Soup", "Sandal")],
            snacks: vec![food("Lassi", "DALmoth"), food("Dal", "दाल")],
        }
    }

    fn names(items: &[FoodItem]) -> Vec<&str> {
        items.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_name_match_is_case_insensitive_across_buckets() {
        let results = search_foods(&fixture(), "DAL");
        // "Lassi" matches through its local name "DALmoth"
        assert_eq!(
            names(&results),
            vec!["Moong Dal Cheela", "Dal Bhat", "Sandal Soup", "Lassi", "Dal"]
        );
    }

    #[test]
    fn test_local_name_match_is_case_sensitive() {
        let results = search_foods(&fixture(), "dalmoth");
        assert!(results.is_empty());

        let results = search_foods(&fixture(), "DALm");
        assert_eq!(names(&results), vec!["Lassi"]);
    }

    #[test]
    fn test_localized_script_query() {
        let results = search_foods(&fixture(), "दाल");
        assert_eq!(names(&results), vec!["Moong Dal Cheela", "Dal Bhat", "Dal"]);
    }

    #[test]
    fn test_builtin_dal_search_spans_buckets() {
        let catalog = FoodCatalog::builtin().unwrap();
        let results = search_foods(&catalog, "dal");

        let expected: Vec<&FoodItem> = catalog
            .all_foods()
            .filter(|f| f.name.to_lowercase().contains("dal"))
            .collect();
        assert!(expected.len() >= 3);
        for item in &expected {
            assert!(results.contains(item));
        }

        let buckets = MealType::ALL
            .into_iter()
            .filter(|m| catalog.bucket(*m).iter().any(|f| results.contains(f)))
            .count();
        assert!(buckets >= 2);
    }

    #[test]
    fn test_duplicates_are_all_returned() {
        let mut catalog = fixture();
        catalog.dinner.push(food("Kwati", "क्वाटी"));

        let results = search_foods(&catalog, "kwati");
        assert_eq!(results.len(), 2);
    }
}

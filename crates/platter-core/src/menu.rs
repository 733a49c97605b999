//! # Menu Filtering
//!
//! Category tabs and free-text search over the catalog.
//!
//! ```text
//! [All] [Popular] [Starters] [Main Course] [Desserts] [Beverages]
//!   │
//!   ▼
//! MenuFilter { category: "Starters", search: "paneer" }
//!   │
//!   ├── category == item.category (exact, skipped for "All")
//!   └── search ⊂ name or description (case-insensitive)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CatalogItem;

/// Category tab that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Category tabs shown above the menu, in display order.
pub const MENU_CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Popular",
    "Starters",
    "Main Course",
    "Desserts",
    "Beverages",
];

/// Filter applied to the full catalog before display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuFilter {
    /// `None` or `"All"` shows every category.
    pub category: Option<String>,

    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
}

impl MenuFilter {
    /// Filter on a single category.
    pub fn category(category: impl Into<String>) -> Self {
        MenuFilter {
            category: Some(category.into()),
            search: None,
        }
    }

    /// Free-text search across all categories.
    pub fn search(text: impl Into<String>) -> Self {
        MenuFilter {
            category: None,
            search: Some(text.into()),
        }
    }

    /// Checks whether a single item passes the filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(category) = self.active_category() {
            if item.category != category {
                return false;
            }
        }

        match self.active_search() {
            Some(needle) => {
                let needle = needle.to_lowercase();
                item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Returns the matching items, preserving catalog order.
    pub fn apply<'a, I>(&self, items: I) -> Vec<CatalogItem>
    where
        I: IntoIterator<Item = &'a CatalogItem>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    fn active_search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: &str, name: &str, description: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price_cents: 100,
            image_url: String::new(),
            category: category.to_string(),
            is_spicy: false,
            is_vegetarian: false,
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            dish("1", "Paneer Tikka", "Char-grilled cottage cheese", "Starters"),
            dish("2", "Butter Chicken", "Creamy tomato gravy", "Main Course"),
            dish("3", "Gulab Jamun", "Warm syrup dumplings", "Desserts"),
            dish("4", "Chicken 65", "Spicy fried chicken", "Starters"),
        ]
    }

    #[test]
    fn test_default_filter_returns_everything() {
        let items = catalog();
        assert_eq!(MenuFilter::default().apply(&items).len(), 4);
        assert_eq!(MenuFilter::category(ALL_CATEGORIES).apply(&items).len(), 4);
    }

    #[test]
    fn test_category_filter() {
        let items = catalog();
        let starters = MenuFilter::category("Starters").apply(&items);
        let ids: Vec<&str> = starters.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitively() {
        let items = catalog();
        assert_eq!(MenuFilter::search("CHICKEN").apply(&items).len(), 2);
        assert_eq!(MenuFilter::search("syrup").apply(&items)[0].id, "3");
        assert_eq!(MenuFilter::search("   ").apply(&items).len(), 4);
    }

    #[test]
    fn test_category_and_search_combine() {
        let items = catalog();
        let filter = MenuFilter {
            category: Some("Starters".to_string()),
            search: Some("chicken".to_string()),
        };
        let result = filter.apply(&items);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "4");
    }

    #[test]
    fn test_categories_start_with_all() {
        assert_eq!(MENU_CATEGORIES.first(), Some(&ALL_CATEGORIES));
    }
}

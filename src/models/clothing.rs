use serde::{Deserialize, Serialize};

/// Trending score above which an item counts as "currently trending"
pub const TRENDING_THRESHOLD: f64 = 0.7;

/// A clothing item as supplied by the catalog
///
/// Owned by the catalog supplier and never mutated by the engine. Every field
/// other than the id defaults to an empty/neutral value so partial retailer
/// payloads still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ClothingItem {
    pub item_id: String,
    pub name: String,
    pub brand: String,
    /// Broad category, e.g. "tops", "bottoms", "shoes"
    pub category: String,
    /// Narrower category, e.g. "t-shirts", "jeans"
    pub subcategory: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub description: String,
    pub style_tags: Vec<String>,
    pub material: Option<String>,
    pub pattern: Option<String>,
    pub fit_type: Option<String>,
    pub occasion_tags: Vec<String>,
    pub season_tags: Vec<String>,
    pub sustainable: bool,
    /// 0-1 score indicating how trending the item is
    pub trending_score: f64,
    pub retailer_id: String,
}

impl ClothingItem {
    /// Creates an item with only the identifying fields set
    pub fn new(item_id: impl Into<String>, brand: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            brand: brand.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Lowercased category
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }

    /// Lowercased subcategory, if any
    pub fn subcategory_key(&self) -> Option<String> {
        self.subcategory
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// The most specific category known for this item (subcategory first)
    pub fn specific_category(&self) -> String {
        self.subcategory_key().unwrap_or_else(|| self.category_key())
    }

    /// Whether the item belongs to `category` by either category or subcategory
    pub fn in_category(&self, category: &str) -> bool {
        self.category_key() == category || self.subcategory_key().as_deref() == Some(category)
    }

    /// Lowercased pattern, if declared
    pub fn pattern_key(&self) -> Option<String> {
        self.pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_trending(&self) -> bool {
        self.trending_score > TRENDING_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_neutral_values() {
        let item: ClothingItem =
            serde_json::from_str(r#"{"item_id": "acme_tops_black", "category": "tops"}"#).unwrap();
        assert_eq!(item.item_id, "acme_tops_black");
        assert!(item.colors.is_empty());
        assert!(item.pattern.is_none());
        assert_eq!(item.trending_score, 0.0);
        assert!(!item.sustainable);
    }

    #[test]
    fn test_specific_category_prefers_subcategory() {
        let mut item = ClothingItem::new("1", "Acme", "Tops");
        assert_eq!(item.specific_category(), "tops");

        item.subcategory = Some("T-Shirts".to_string());
        assert_eq!(item.specific_category(), "t-shirts");
        assert!(item.in_category("tops"));
        assert!(item.in_category("t-shirts"));
        assert!(!item.in_category("bottoms"));
    }

    #[test]
    fn test_trending_threshold_is_exclusive() {
        let mut item = ClothingItem::new("1", "Acme", "tops");
        item.trending_score = 0.7;
        assert!(!item.is_trending());
        item.trending_score = 0.71;
        assert!(item.is_trending());
    }
}

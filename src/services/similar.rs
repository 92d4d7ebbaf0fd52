//! Catalog items that resemble a reference item.

use std::collections::BTreeSet;

use crate::models::ClothingItem;

use super::scoring::ItemScorer;
use super::style_profile::StyleProfile;

const CATEGORY_WEIGHT: f64 = 0.30;
const SUBCATEGORY_WEIGHT: f64 = 0.20;
const STYLE_WEIGHT: f64 = 0.20;
const COLOR_WEIGHT: f64 = 0.15;
const BRAND_WEIGHT: f64 = 0.10;
const PRICE_WEIGHT: f64 = 0.05;

/// Prices closer than this ratio count as the same range
const MIN_PRICE_RATIO: f64 = 0.7;

/// Share of the combined score taken by similarity when a profile is supplied
const SIMILARITY_SHARE: f64 = 0.7;

fn lowercased(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Overlap as a fraction of the reference set
fn overlap(reference: &BTreeSet<String>, other: &BTreeSet<String>) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    reference.intersection(other).count() as f64 / reference.len() as f64
}

/// How much `item` resembles `reference`, in `[0, 1]`
pub fn similarity(reference: &ClothingItem, item: &ClothingItem) -> f64 {
    let mut score = 0.0;

    if reference.category_key() == item.category_key() {
        score += CATEGORY_WEIGHT;
    }
    if let Some(subcategory) = reference.subcategory_key() {
        if item.subcategory_key().as_deref() == Some(subcategory.as_str()) {
            score += SUBCATEGORY_WEIGHT;
        }
    }

    score += STYLE_WEIGHT * overlap(&lowercased(&reference.style_tags), &lowercased(&item.style_tags));
    score += COLOR_WEIGHT * overlap(&lowercased(&reference.colors), &lowercased(&item.colors));

    if !reference.brand.trim().is_empty() && reference.brand.eq_ignore_ascii_case(&item.brand) {
        score += BRAND_WEIGHT;
    }

    if reference.price > 0.0 && item.price > 0.0 {
        let ratio = reference.price.min(item.price) / reference.price.max(item.price);
        if ratio > MIN_PRICE_RATIO {
            score += PRICE_WEIGHT * ratio;
        }
    }

    score
}

/// Items most similar to `reference`, best first
///
/// With a profile the ranking blends similarity (70%) with the item score (30%).
/// `category` restricts candidates the same way a catalog category filter would.
pub fn find_similar<'a>(
    reference: &ClothingItem,
    catalog: &'a [ClothingItem],
    profile: Option<&StyleProfile>,
    category: Option<&str>,
    limit: usize,
) -> Vec<&'a ClothingItem> {
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());
    let scorer = profile.map(|p| ItemScorer::new(p, None));

    let mut scored: Vec<(&ClothingItem, f64)> = catalog
        .iter()
        .filter(|item| item.item_id != reference.item_id)
        .filter(|item| category.as_deref().map_or(true, |c| item.in_category(c)))
        .map(|item| {
            let base = similarity(reference, item);
            let score = match &scorer {
                Some(scorer) => {
                    base * SIMILARITY_SHARE + scorer.score(item).score * (1.0 - SIMILARITY_SHARE)
                }
                None => base,
            };
            (item, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    tracing::debug!(
        reference = %reference.item_id,
        candidates = scored.len(),
        personalized = scorer.is_some(),
        "Ranked similar items"
    );

    scored.into_iter().take(limit).map(|(item, _)| item).collect()
}

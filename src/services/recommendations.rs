use std::collections::HashSet;

use chrono::Utc;

use crate::models::{
    ClothingItem, ItemRecommendation, RecommendationResponse, SocialProofContext, UserProfile,
};

use super::compatibility::{colors_compatible, patterns_compatible};
use super::outfits::{build_outfit, find_complementary};
use super::scoring::ItemScorer;
use super::social_proof::MIN_MATCH_SCORE;
use super::style_profile::build_style_profile;

/// Number of buckets a result list is split across
const BUCKET_COUNT: usize = 5;

pub const DEFAULT_OCCASION: &str = "Everyday Casual";

/// Tunables for a recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSettings {
    /// Maximum number of recommended items
    pub max_recommendations: usize,
    /// Complementary items attached to each recommendation
    pub complementary_limit: usize,
    /// Number of top recommendations used as outfit anchors
    pub outfit_anchors: usize,
    /// Outfits must score strictly above this to be returned
    pub min_outfit_score: f64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_recommendations: 20,
            complementary_limit: 3,
            outfit_anchors: 5,
            min_outfit_score: 0.6,
        }
    }
}

/// Ordered, insert-if-absent collection of items keyed by item id
///
/// Items inserted earlier keep their position; later duplicates are dropped.
#[derive(Debug, Default)]
pub struct PriorityMerge<'a> {
    seen: HashSet<&'a str>,
    items: Vec<&'a ClothingItem>,
}

impl<'a> PriorityMerge<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the item unless its id is already present
    pub fn insert(&mut self, item: &'a ClothingItem) -> bool {
        if self.seen.insert(item.item_id.as_str()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn extend<I: IntoIterator<Item = &'a ClothingItem>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }

    /// Inserts from `items` until `target` entries are held
    pub fn fill<I: IntoIterator<Item = &'a ClothingItem>>(&mut self, items: I, target: usize) {
        for item in items {
            if self.items.len() >= target {
                break;
            }
            self.insert(item);
        }
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.seen.contains(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<&'a ClothingItem> {
        self.items
    }
}

/// Ranks items by profile score, best first; ties keep catalog order
fn rank_by_score<'a>(
    scorer: &ItemScorer<'_>,
    items: impl IntoIterator<Item = &'a ClothingItem>,
) -> Vec<&'a ClothingItem> {
    let mut scored: Vec<(&ClothingItem, f64)> = items
        .into_iter()
        .map(|item| (item, scorer.score(item).score))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(item, _)| item).collect()
}

fn goes_with_closet(item: &ClothingItem, user: &UserProfile) -> bool {
    user.closet_items.iter().any(|owned| {
        colors_compatible(&item.colors, &owned.colors())
            || patterns_compatible(item.pattern.as_deref(), owned.pattern.as_deref()).0
            || item
                .style_tags
                .iter()
                .any(|tag| owned.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    })
}

fn matches_brand(item: &ClothingItem, favorite_brands: &[String]) -> bool {
    let brand = item.brand.trim().to_lowercase();
    !brand.is_empty()
        && favorite_brands
            .iter()
            .any(|favorite| brand.contains(favorite.as_str()) || favorite.contains(&brand))
}

/// Produces item and outfit recommendations for a user
///
/// Items the user already owns, and items hitting one of their dislikes, are
/// never recommended. The remaining catalog is split into five independently
/// ranked buckets (closet affinity, social proof, trending, brand affinity and
/// best guess) which are merged in that priority order.
pub fn generate_recommendations(
    user: &UserProfile,
    catalog: &[ClothingItem],
    context: Option<String>,
    social_proof: Option<&SocialProofContext>,
    settings: &RecommendationSettings,
) -> RecommendationResponse {
    let profile = build_style_profile(user);
    let ranking = ItemScorer::new(&profile, None);
    let annotating = ItemScorer::new(&profile, social_proof);

    let owned: HashSet<&str> = user.closet_items.iter().map(|i| i.item_id.as_str()).collect();
    let candidates: Vec<ClothingItem> = catalog
        .iter()
        .filter(|item| !owned.contains(item.item_id.as_str()))
        .filter(|item| !ranking.is_vetoed(item))
        .cloned()
        .collect();

    if candidates.is_empty() || settings.max_recommendations == 0 {
        tracing::info!(user_id = %user.user_id, "No candidate items to recommend");
        return RecommendationResponse::empty(user.user_id.clone(), context);
    }

    let total = settings.max_recommendations;
    let bucket_size = (total / BUCKET_COUNT).max(1);
    let best_guess_size = total.saturating_sub((BUCKET_COUNT - 1) * bucket_size);

    let closet_bucket: Vec<&ClothingItem> = rank_by_score(
        &ranking,
        candidates.iter().filter(|item| goes_with_closet(item, user)),
    )
    .into_iter()
    .take(bucket_size)
    .collect();

    let social_bucket: Vec<&ClothingItem> = match social_proof {
        Some(_) => {
            let mut matched: Vec<(&ClothingItem, f64)> = candidates
                .iter()
                .map(|item| (item, annotating.social_match(item)))
                .filter(|(_, score)| *score > MIN_MATCH_SCORE)
                .collect();
            matched.sort_by(|a, b| b.1.total_cmp(&a.1));
            matched.into_iter().take(bucket_size).map(|(item, _)| item).collect()
        }
        None => Vec::new(),
    };

    let trending_bucket: Vec<&ClothingItem> =
        rank_by_score(&ranking, candidates.iter().filter(|item| item.is_trending()))
            .into_iter()
            .take(bucket_size)
            .collect();

    let favorite_brands = user.favorite_brands();
    let brand_bucket: Vec<&ClothingItem> = rank_by_score(
        &ranking,
        candidates
            .iter()
            .filter(|item| matches_brand(item, &favorite_brands)),
    )
    .into_iter()
    .take(bucket_size)
    .collect();

    let global_ranking = rank_by_score(&ranking, &candidates);

    let mut merged = PriorityMerge::new();
    for bucket in [&closet_bucket, &social_bucket, &trending_bucket, &brand_bucket] {
        merged.extend(bucket.iter().copied());
    }
    let chosen_before_best_guess = merged.len();
    let best_guess: Vec<&ClothingItem> = global_ranking
        .iter()
        .copied()
        .filter(|item| !merged.contains(&item.item_id))
        .take(best_guess_size)
        .collect();
    merged.extend(best_guess);
    merged.fill(global_ranking.iter().copied(), total);

    let mut selected = merged.into_items();
    selected.truncate(total);

    tracing::debug!(
        user_id = %user.user_id,
        closet = closet_bucket.len(),
        social_proof = social_bucket.len(),
        trending = trending_bucket.len(),
        brand = brand_bucket.len(),
        bucketed = chosen_before_best_guess,
        selected = selected.len(),
        "Merged recommendation buckets"
    );

    let recommended_items: Vec<ItemRecommendation> = selected
        .iter()
        .map(|item| {
            let scored = annotating.score(item);
            ItemRecommendation {
                item_id: item.item_id.clone(),
                score: scored.score,
                match_reasons: scored.reasons,
                complementary_items: find_complementary(
                    item,
                    &candidates,
                    &profile,
                    settings.complementary_limit,
                ),
                social_proof: scored.social_proof,
            }
        })
        .collect();

    let recommended_outfits = selected
        .iter()
        .take(settings.outfit_anchors)
        .filter_map(|anchor| {
            let occasion = anchor
                .occasion_tags
                .iter()
                .find(|o| !o.trim().is_empty())
                .map(String::as_str)
                .unwrap_or(DEFAULT_OCCASION);
            build_outfit(anchor, &candidates, &profile, occasion, social_proof)
        })
        .filter(|outfit| outfit.score > settings.min_outfit_score)
        .collect::<Vec<_>>();

    tracing::info!(
        user_id = %user.user_id,
        candidates = candidates.len(),
        items = recommended_items.len(),
        outfits = recommended_outfits.len(),
        social_proof = social_proof.map(|c| c.celebrity.as_str()).unwrap_or(""),
        "Generated recommendations"
    );

    RecommendationResponse {
        user_id: user.user_id.clone(),
        timestamp: Utc::now(),
        recommended_items,
        recommended_outfits,
        recommendation_context: context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClosetItem;

    fn item(id: &str, brand: &str, category: &str, color: &str) -> ClothingItem {
        let mut item = ClothingItem::new(id, brand, category);
        item.colors = vec![color.to_string()];
        item
    }

    #[test]
    fn test_priority_merge_keeps_first_occurrence() {
        let a = item("a", "x", "tops", "black");
        let b = item("b", "x", "tops", "black");
        let c = item("c", "x", "tops", "black");

        let mut merged = PriorityMerge::new();
        merged.extend([&a, &b]);
        assert!(!merged.insert(&a));
        merged.extend([&c, &b]);

        let merged = merged.into_items();
        let ids: Vec<&str> = merged.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_priority_merge_fill_stops_at_target() {
        let items: Vec<ClothingItem> = (0..5).map(|i| item(&i.to_string(), "x", "tops", "black")).collect();
        let mut merged = PriorityMerge::new();
        merged.insert(&items[3]);
        merged.fill(items.iter(), 3);
        let merged = merged.into_items();
        let ids: Vec<&str> = merged.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "0", "1"]);
    }

    #[test]
    fn test_brand_matching_is_fuzzy() {
        let favorites = vec!["acme".to_string()];
        assert!(matches_brand(&item("a", "Acme Studio", "tops", "black"), &favorites));
        assert!(matches_brand(&item("b", "ACME", "tops", "black"), &favorites));
        assert!(!matches_brand(&item("c", "Zed", "tops", "black"), &favorites));
        assert!(!matches_brand(&item("d", "", "tops", "black"), &favorites));
    }

    #[test]
    fn test_bucket_sizes_with_small_totals() {
        let catalog: Vec<ClothingItem> = (0..10)
            .map(|i| item(&format!("item-{}", i), "x", "tops", "black"))
            .collect();
        let user = UserProfile::new("u1");
        let settings = RecommendationSettings {
            max_recommendations: 3,
            ..Default::default()
        };

        let response = generate_recommendations(&user, &catalog, None, None, &settings);
        let ids: Vec<&str> = response
            .recommended_items
            .iter()
            .map(|r| r.item_id.as_str())
            .collect();
        assert_eq!(ids, vec!["item-0", "item-1", "item-2"]);
    }

    #[test]
    fn test_closet_items_are_excluded() {
        let catalog = vec![
            item("owned", "x", "tops", "black"),
            item("new", "x", "tops", "white"),
        ];
        let mut user = UserProfile::new("u1");
        user.add_closet_item(ClosetItem::new("owned", "tops", "black"));

        let response = generate_recommendations(
            &user,
            &catalog,
            Some("weekend".to_string()),
            None,
            &RecommendationSettings::default(),
        );
        assert_eq!(response.recommended_items.len(), 1);
        assert_eq!(response.recommended_items[0].item_id, "new");
        assert_eq!(response.recommendation_context.as_deref(), Some("weekend"));
    }

    #[test]
    fn test_empty_catalog_gives_empty_response() {
        let user = UserProfile::new("u1");
        let response =
            generate_recommendations(&user, &[], None, None, &RecommendationSettings::default());
        assert!(response.recommended_items.is_empty());
        assert!(response.recommended_outfits.is_empty());
        assert_eq!(response.user_id, "u1");
    }
}

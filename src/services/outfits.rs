//! Complementary item lookup and greedy outfit assembly around an anchor item.

use uuid::Uuid;

use crate::models::{ClothingItem, OutfitRecommendation, SocialProofContext, SocialProofMatch};

use super::compatibility::{colors_compatible, patterns_compatible};
use super::scoring::ItemScorer;
use super::style_profile::StyleProfile;

/// Categories that pair with each category, keyed by the most specific category
const COMPLEMENTARY_CATEGORIES: &[(&str, &[&str])] = &[
    ("tops", &["bottoms", "shoes", "accessories"]),
    ("shirts", &["pants", "jeans", "shoes", "accessories"]),
    ("t-shirts", &["jeans", "shorts", "shoes", "accessories"]),
    ("blouses", &["skirts", "pants", "accessories"]),
    ("bottoms", &["tops", "shoes", "accessories"]),
    ("pants", &["shirts", "t-shirts", "shoes", "accessories"]),
    ("jeans", &["t-shirts", "shirts", "shoes", "accessories"]),
    ("skirts", &["blouses", "tops", "shoes", "accessories"]),
    ("dresses", &["shoes", "accessories"]),
    ("outerwear", &["tops", "bottoms", "shoes"]),
    ("shoes", &["tops", "bottoms"]),
    ("accessories", &["tops", "bottoms", "dresses"]),
];

/// Fill order for missing outfit categories
const OUTFIT_CATEGORIES: &[&str] = &["tops", "bottoms", "shoes", "accessories"];

/// Occasions that call for accessories
const DRESSY_OCCASIONS: &[&str] = &["formal", "business", "date night"];

const MIN_OUTFIT_ITEMS: usize = 3;

/// Occasion used when neither the caller nor the seed items name one
const FALLBACK_OCCASION: &str = "casual";

/// Minimum average pattern score tolerated for a candidate that clashes with a member
const MIN_PATTERN_SCORE: f64 = 0.3;

/// Social proof match above which an outfit member counts as a strong match
const STRONG_SOCIAL_MATCH: f64 = 0.5;

fn complementary_categories(category: &str) -> &'static [&'static str] {
    COMPLEMENTARY_CATEGORIES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Sorts by score descending; equal scores keep their input order
fn rank<T>(scored: &mut [(T, f64)]) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
}

/// Items from adjacent categories that pair well with `anchor`, best first
pub fn find_complementary(
    anchor: &ClothingItem,
    catalog: &[ClothingItem],
    profile: &StyleProfile,
    limit: usize,
) -> Vec<String> {
    let targets = complementary_categories(&anchor.specific_category());
    if targets.is_empty() || limit == 0 {
        return Vec::new();
    }

    let scorer = ItemScorer::new(profile, None);
    let mut scored: Vec<(&ClothingItem, f64)> = catalog
        .iter()
        .filter(|c| c.item_id != anchor.item_id)
        .filter(|c| targets.contains(&c.specific_category().as_str()))
        .map(|candidate| {
            let color_ok = colors_compatible(&anchor.colors, &candidate.colors);
            let (pattern_ok, pattern_score) =
                patterns_compatible(anchor.pattern.as_deref(), candidate.pattern.as_deref());

            let mut score = scorer.score(candidate).score;
            if color_ok {
                score *= 1.2;
            }
            if pattern_ok {
                score *= 1.0 + pattern_score * 0.3;
            } else {
                score *= 1.0 - (1.0 - pattern_score) * 0.5;
            }
            if !color_ok && !pattern_ok {
                score *= 0.5;
            }
            (candidate, score)
        })
        .collect();

    rank(&mut scored);
    scored
        .into_iter()
        .take(limit)
        .map(|(item, _)| item.item_id.clone())
        .collect()
}

fn required_categories(anchor: &ClothingItem, occasion: &str) -> Vec<&'static str> {
    let occasion = occasion.trim().to_lowercase().replace('_', " ");
    let dressy = DRESSY_OCCASIONS.contains(&occasion.as_str());
    let dress_anchor = anchor.in_category("dresses");

    OUTFIT_CATEGORIES
        .iter()
        .copied()
        .filter(|c| dressy || *c != "accessories")
        .filter(|c| !(dress_anchor && (*c == "tops" || *c == "bottoms")))
        .collect()
}

fn outfit_type(members: &[&ClothingItem]) -> &'static str {
    let has = |category: &str| members.iter().any(|m| m.in_category(category));
    if has("dresses") {
        "dress"
    } else if has("tops") && has("bottoms") {
        "separates"
    } else {
        "outfit"
    }
}

fn pattern_summary(members: &[&ClothingItem]) -> String {
    let patterns: Vec<String> = members.iter().filter_map(|m| m.pattern_key()).collect();

    if patterns.is_empty() {
        return "Simple solid colors that work well together".to_string();
    }
    if patterns.iter().all(|p| p == "solid") {
        return "Clean solid colors throughout".to_string();
    }
    if let Some(featured) = patterns.iter().find(|p| *p != "solid") {
        if patterns.iter().any(|p| p == "solid") {
            return format!("Balanced {} pattern with solid pieces", featured);
        }
    }
    "Harmonious pattern combinations".to_string()
}

/// Deterministic outfit id derived from the member ids
fn outfit_id<'a>(item_ids: impl IntoIterator<Item = &'a str>) -> String {
    let key = item_ids.into_iter().collect::<Vec<_>>().join("|");
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());
    format!("outfit_{}", uuid.simple())
}

/// Greedily assembles an outfit around `anchor`
///
/// Each missing category is filled with the best-scoring candidate that is
/// color-compatible with every current member. Returns `None` when fewer than
/// three items could be assembled.
pub fn build_outfit(
    anchor: &ClothingItem,
    catalog: &[ClothingItem],
    profile: &StyleProfile,
    occasion: &str,
    context: Option<&SocialProofContext>,
) -> Option<OutfitRecommendation> {
    let scorer = ItemScorer::new(profile, context);
    let mut members: Vec<&ClothingItem> = vec![anchor];

    for category in required_categories(anchor, occasion) {
        if members.iter().any(|m| m.in_category(category)) {
            continue;
        }

        let mut scored: Vec<(&ClothingItem, f64)> = catalog
            .iter()
            .filter(|c| c.in_category(category))
            .filter(|c| !members.iter().any(|m| m.item_id == c.item_id))
            .filter_map(|candidate| {
                if !members.iter().all(|m| colors_compatible(&m.colors, &candidate.colors)) {
                    return None;
                }

                let mut patterns_ok = true;
                let mut pattern_total = 0.0;
                for member in &members {
                    let (ok, score) =
                        patterns_compatible(member.pattern.as_deref(), candidate.pattern.as_deref());
                    patterns_ok &= ok;
                    pattern_total += score;
                }
                let pattern_avg = pattern_total / members.len() as f64;
                if !patterns_ok && pattern_avg < MIN_PATTERN_SCORE {
                    return None;
                }

                let mut score = scorer.score(candidate).score * 1.1;
                if patterns_ok {
                    score *= 1.0 + pattern_avg * 0.2;
                } else {
                    score *= 1.0 - (1.0 - pattern_avg) * 0.2;
                }

                let social = scorer.social_match(candidate);
                if social > STRONG_SOCIAL_MATCH {
                    score *= 1.0 + social * 0.3;
                }

                Some((candidate, score))
            })
            .collect();

        rank(&mut scored);
        if let Some((best, _)) = scored.first() {
            members.push(*best);
        }
    }

    if members.len() < MIN_OUTFIT_ITEMS {
        tracing::debug!(
            anchor = %anchor.item_id,
            occasion,
            items = members.len(),
            "Not enough compatible items for an outfit"
        );
        return None;
    }

    let plain_scorer = ItemScorer::new(profile, None);
    let score = members
        .iter()
        .map(|m| plain_scorer.score(m).score)
        .sum::<f64>()
        / members.len() as f64;

    let mut match_reasons = vec![
        format!("Complete {} for {}", outfit_type(&members), occasion),
        format!("Coordinated colors and {}", pattern_summary(&members).to_lowercase()),
        "Matches your personal style preferences".to_string(),
    ];

    let mut social_proof = None;
    if let Some(context) = scorer.context() {
        let matches: Vec<f64> = members.iter().map(|m| scorer.social_match(m)).collect();
        let strong = matches.iter().filter(|m| **m > STRONG_SOCIAL_MATCH).count();
        if strong > 0 {
            let line = if strong * 2 > members.len() {
                format!("Inspired by {}'s style", context.celebrity)
            } else {
                format!("Partially inspired by {}'s look", context.celebrity)
            };
            match_reasons.insert(0, line);

            let average = matches.iter().sum::<f64>() / matches.len() as f64;
            social_proof = Some(SocialProofMatch::from_context(context, average));
        }
    }

    Some(OutfitRecommendation {
        outfit_id: outfit_id(members.iter().map(|m| m.item_id.as_str())),
        items: members.iter().map(|m| m.item_id.clone()).collect(),
        score,
        occasion: occasion.to_string(),
        match_reasons,
        social_proof,
    })
}

/// Most frequent occasion tag across the items; ties go to the tag seen first
fn dominant_occasion(items: &[&ClothingItem]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for tag in items
        .iter()
        .flat_map(|i| i.occasion_tags.iter())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
    {
        match counts.iter_mut().find(|(seen, _)| *seen == tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((tag, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (tag, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((tag, count));
        }
    }
    best.map(|(tag, _)| tag.to_string())
}

/// Completes a look from one or more seed items
///
/// The occasion defaults to the seeds' most common occasion tag. When the seeds
/// already cover every required category they are returned as a single outfit
/// with a score of 1.0. Otherwise an outfit is assembled around each seed in
/// turn, seeds the assembly left out are appended, and the best `limit`
/// distinct outfits are returned.
pub fn complete_outfit(
    seeds: &[&ClothingItem],
    catalog: &[ClothingItem],
    profile: &StyleProfile,
    occasion: Option<&str>,
    limit: usize,
) -> Vec<OutfitRecommendation> {
    let Some(first) = seeds.first() else {
        return Vec::new();
    };

    let occasion = occasion
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .or_else(|| dominant_occasion(seeds))
        .unwrap_or_else(|| FALLBACK_OCCASION.to_string());

    let has_dress = seeds.iter().any(|s| s.in_category("dresses"));
    let anchor_needs = required_categories(first, &occasion);
    let missing = anchor_needs
        .iter()
        .filter(|c| !(has_dress && (**c == "tops" || **c == "bottoms")))
        .any(|c| !seeds.iter().any(|s| s.in_category(c)));

    let seed_ids: Vec<String> = seeds.iter().map(|s| s.item_id.clone()).collect();
    if !missing {
        return vec![OutfitRecommendation {
            outfit_id: outfit_id(seed_ids.iter().map(String::as_str)),
            items: seed_ids,
            score: 1.0,
            occasion: occasion.clone(),
            match_reasons: vec![format!("Complete outfit for {}", occasion)],
            social_proof: None,
        }];
    }

    let mut outfits: Vec<OutfitRecommendation> = Vec::new();
    for seed in seeds {
        let Some(mut outfit) = build_outfit(seed, catalog, profile, &occasion, None) else {
            continue;
        };
        for id in &seed_ids {
            if !outfit.items.contains(id) {
                outfit.items.push(id.clone());
            }
        }
        outfit.outfit_id = outfit_id(outfit.items.iter().map(String::as_str));
        if !outfits.iter().any(|o| o.outfit_id == outfit.outfit_id) {
            outfits.push(outfit);
        }
    }

    outfits.sort_by(|a, b| b.score.total_cmp(&a.score));
    outfits.truncate(limit);

    tracing::debug!(
        seeds = seeds.len(),
        occasion = %occasion,
        outfits = outfits.len(),
        "Completed outfits from seed items"
    );
    outfits
}

//! Style profile construction from quiz answers, closet contents and feedback.
//!
//! Each source produces its own sub-profile of `"<dimension>_<value>"` keys. The
//! sub-profiles are blended with fixed source weights, except that dislikes from
//! feedback always land at exactly -1.0 so a single dislike dominates.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ClosetItem, QuizOption, StyleQuizResults, UserFeedback, UserProfile};

use super::compatibility::is_known_pattern;
use super::social_proof::PATTERN_KEYWORDS;

pub const QUIZ_WEIGHT: f64 = 0.5;
pub const CLOSET_WEIGHT: f64 = 0.3;
pub const FEEDBACK_WEIGHT: f64 = 0.2;

/// Multiplier applied to attributes of favorite closet items
pub const FAVORITE_BOOST: f64 = 1.5;

const DISLIKED_PREFIX: &str = "disliked_";

/// Flat map of style attribute keys to signed weights
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleProfile {
    weights: BTreeMap<String, f64>,
}

impl StyleProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    /// Weight for `key` when it is strictly positive
    pub fn positive(&self, key: &str) -> Option<f64> {
        self.get(key).filter(|w| *w > 0.0)
    }

    /// Whether `key` carries a strictly negative weight
    pub fn is_negative(&self, key: &str) -> bool {
        self.get(key).is_some_and(|w| w < 0.0)
    }

    pub fn insert(&mut self, key: impl Into<String>, weight: f64) {
        self.weights.insert(key.into(), weight);
    }

    fn add(&mut self, key: impl Into<String>, weight: f64) {
        *self.weights.entry(key.into()).or_insert(0.0) += weight;
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for weight in self.weights.values_mut() {
                *weight /= total;
            }
        }
    }
}

impl FromIterator<(String, f64)> for StyleProfile {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// Lowercases a free-text value and joins words with underscores
fn slug(value: &str) -> String {
    value.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Quiz sub-profile: one unit weight per selected option, normalized to sum to 1
pub fn analyze_style_quiz(quiz: &StyleQuizResults) -> StyleProfile {
    let mut profile = StyleProfile::new();

    for style in &quiz.overall_style {
        profile.insert(format!("style_{}", style.key()), 1.0);
    }
    for palette in &quiz.color_palette {
        profile.insert(format!("color_{}", palette.key()), 1.0);
    }
    let patterns = quiz.pattern_preference.iter().chain(&quiz.preferred_patterns);
    for pattern in patterns.map(|p| slug(p)).filter(|p| !p.is_empty()) {
        profile.insert(format!("pattern_{}", pattern), 1.0);
    }
    for fit in &quiz.top_fit {
        profile.insert(format!("top_fit_{}", fit.key()), 1.0);
    }
    for fit in quiz.bottom_fit.iter().map(|f| slug(f)).filter(|f| !f.is_empty()) {
        profile.insert(format!("bottom_fit_{}", fit), 1.0);
    }
    for occasion in &quiz.occasion_preferences {
        profile.insert(format!("occasion_{}", occasion.key()), 1.0);
    }
    if quiz.sustainability_priority {
        profile.insert("sustainability", 1.0);
    }
    if quiz.secondhand_interest {
        profile.insert("secondhand", 1.0);
    }
    if let Some(season) = quiz.seasonal_preference.as_deref().map(slug) {
        profile.insert(format!("season_{}", season), 1.0);
    }
    if let Some(budget) = quiz.budget_range {
        profile.insert(format!("budget_{}", budget.key()), 1.0);
    }

    profile.normalize();
    profile
}

/// Counts attribute occurrences across a set of closet items
#[derive(Default)]
struct ClosetTally {
    categories: HashMap<String, usize>,
    colors: HashMap<String, usize>,
    brands: HashMap<String, usize>,
    tags: HashMap<String, usize>,
}

impl ClosetTally {
    fn count<'a>(items: impl Iterator<Item = &'a ClosetItem>, with_subcategories: bool) -> Self {
        let mut tally = Self::default();
        for item in items {
            let category = item.category.to_lowercase();
            if with_subcategories {
                if let Some(sub) = item.subcategory.as_deref().filter(|s| !s.is_empty()) {
                    *tally
                        .categories
                        .entry(format!("{}_{}", category, sub.to_lowercase()))
                        .or_default() += 1;
                }
            }
            *tally.categories.entry(category).or_default() += 1;

            if !item.color.is_empty() {
                *tally.colors.entry(item.color.to_lowercase()).or_default() += 1;
            }
            if let Some(brand) = item.brand.as_deref().filter(|b| !b.is_empty()) {
                *tally.brands.entry(brand.to_lowercase()).or_default() += 1;
            }
            for tag in &item.tags {
                *tally.tags.entry(tag.to_lowercase()).or_default() += 1;
            }
        }
        tally
    }

    fn write_into(self, profile: &mut StyleProfile, prefix: &str, total: usize, boost: f64) {
        let groups = [
            ("category", self.categories),
            ("color", self.colors),
            ("brand", self.brands),
            ("tag", self.tags),
        ];
        for (dimension, counts) in groups {
            for (value, count) in counts {
                let weight = count as f64 / total as f64 * boost;
                profile.insert(format!("{}{}_{}", prefix, dimension, value), weight);
            }
        }
    }
}

/// Closet sub-profile: attribute frequencies, plus boosted `favorite_*` frequencies
pub fn analyze_closet(closet_items: &[ClosetItem]) -> StyleProfile {
    let mut profile = StyleProfile::new();
    if closet_items.is_empty() {
        return profile;
    }

    ClosetTally::count(closet_items.iter(), true).write_into(&mut profile, "", closet_items.len(), 1.0);

    let favorites: Vec<&ClosetItem> = closet_items.iter().filter(|i| i.favorite).collect();
    if !favorites.is_empty() {
        ClosetTally::count(favorites.iter().copied(), false).write_into(
            &mut profile,
            "favorite_",
            favorites.len(),
            FAVORITE_BOOST,
        );
    }

    profile
}

/// Attribute tokens mined from feedback item ids of the form `brand_category_color[_tag...]`
fn feedback_tokens(item_id: &str) -> Option<Vec<(&'static str, String)>> {
    let parts: Vec<String> = item_id
        .split('_')
        .map(|p| p.trim().to_lowercase())
        .collect();
    if parts.len() < 3 || parts[..3].iter().any(String::is_empty) {
        return None;
    }

    let mut tokens = vec![
        ("brand", parts[0].clone()),
        ("category", parts[1].clone()),
        ("color", parts[2].clone()),
    ];
    for extra in parts[3..].iter().filter(|p| !p.is_empty()) {
        tokens.push(("tag", extra.clone()));
        if PATTERN_KEYWORDS.contains(&extra.as_str()) || is_known_pattern(extra) {
            tokens.push(("pattern", extra.clone()));
        }
    }
    Some(tokens)
}

/// Feedback sub-profile: +1.0 for attributes of liked items, -1.0 for disliked ones
///
/// Ids that do not follow the token structure are skipped.
pub fn analyze_feedback(feedback: &UserFeedback) -> StyleProfile {
    let mut profile = StyleProfile::new();

    for (prefix, ids, weight) in [
        ("liked_", &feedback.liked_items, 1.0),
        (DISLIKED_PREFIX, &feedback.disliked_items, -1.0),
    ] {
        for item_id in ids {
            let Some(tokens) = feedback_tokens(item_id) else {
                tracing::debug!(item_id = %item_id, "Feedback id has no attribute tokens, skipping");
                continue;
            };
            for (dimension, value) in tokens {
                profile.insert(format!("{}{}_{}", prefix, dimension, value), weight);
            }
        }
    }

    profile
}

/// Blends the three sub-profiles with the fixed source weights
pub fn combine_profiles(quiz: &StyleProfile, closet: &StyleProfile, feedback: &StyleProfile) -> StyleProfile {
    let mut combined = StyleProfile::new();

    for (key, weight) in quiz.iter() {
        combined.add(key, weight * QUIZ_WEIGHT);
    }
    for (key, weight) in closet.iter() {
        combined.add(key, weight * CLOSET_WEIGHT);
    }
    for (key, weight) in feedback.iter() {
        if key.starts_with(DISLIKED_PREFIX) {
            combined.insert(key, -1.0);
        } else {
            combined.add(key, weight * FEEDBACK_WEIGHT);
        }
    }

    combined
}

/// Builds the complete style profile for a user
pub fn build_style_profile(user: &UserProfile) -> StyleProfile {
    let quiz = user
        .style_quiz
        .as_ref()
        .map(analyze_style_quiz)
        .unwrap_or_default();
    let closet = analyze_closet(&user.closet_items);
    let feedback = analyze_feedback(&user.feedback);

    let profile = combine_profiles(&quiz, &closet, &feedback);

    tracing::debug!(
        user_id = %user.user_id,
        quiz_keys = quiz.len(),
        closet_keys = closet.len(),
        feedback_keys = feedback.len(),
        total_keys = profile.len(),
        "Built style profile"
    );

    profile
}

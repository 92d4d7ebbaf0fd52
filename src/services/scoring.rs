//! Scores a single catalog item against a style profile.

use crate::models::{ClothingItem, SocialProofContext, SocialProofMatch};

use super::social_proof::{match_signals, OutfitSignals};
use super::style_profile::StyleProfile;

const STYLE_WEIGHT: f64 = 0.35;
const COLOR_WEIGHT: f64 = 0.20;
const FIT_WEIGHT: f64 = 0.15;
const OCCASION_WEIGHT: f64 = 0.20;
const TRENDING_WEIGHT: f64 = 0.05;
const AVAILABILITY_WEIGHT: f64 = 0.05;
const PATTERN_WEIGHT: f64 = 0.15;
const SOCIAL_PROOF_WEIGHT: f64 = 0.20;

/// Every catalog item is assumed to be purchasable
const AVAILABILITY_BASELINE: f64 = 1.0;

const SOLID_PATTERN_SCORE: f64 = 0.8;
const OTHER_PATTERN_SCORE: f64 = 0.5;
/// Items without a declared pattern are treated as plain
const MISSING_PATTERN_SCORE: f64 = 0.7;

/// Social proof score above which the match is attributed on the recommendation
pub const ATTRIBUTION_THRESHOLD: f64 = 0.6;

const MAX_REASONS: usize = 3;
const MAX_REASONS_WITH_SOCIAL_PROOF: usize = 4;

/// Categories whose fit is compared against the top-fit preferences
const TOP_CATEGORIES: &[&str] = &["tops", "shirts", "t-shirts"];

/// Which optional components take part in the weighted sum
///
/// Live scoring always enables the pattern component; social proof is enabled
/// whenever a context is supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringFlags {
    pub pattern: bool,
    pub social_proof: bool,
}

/// Component weights; always sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub style: f64,
    pub color: f64,
    pub fit: f64,
    pub occasion: f64,
    pub trending: f64,
    pub availability: f64,
    pub pattern: f64,
    pub social_proof: f64,
}

impl ScoringWeights {
    /// Base weights scaled down to make room for the active optional components
    pub fn for_flags(flags: ScoringFlags) -> Self {
        let pattern = if flags.pattern { PATTERN_WEIGHT } else { 0.0 };
        let social_proof = if flags.social_proof { SOCIAL_PROOF_WEIGHT } else { 0.0 };
        let scale = 1.0 - pattern - social_proof;

        Self {
            style: STYLE_WEIGHT * scale,
            color: COLOR_WEIGHT * scale,
            fit: FIT_WEIGHT * scale,
            occasion: OCCASION_WEIGHT * scale,
            trending: TRENDING_WEIGHT * scale,
            availability: AVAILABILITY_WEIGHT * scale,
            pattern,
            social_proof,
        }
    }

    pub fn total(&self) -> f64 {
        self.style
            + self.color
            + self.fit
            + self.occasion
            + self.trending
            + self.availability
            + self.pattern
            + self.social_proof
    }
}

/// Result of scoring one item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemScore {
    pub score: f64,
    pub reasons: Vec<String>,
    /// Present only for strong social proof matches
    pub social_proof: Option<SocialProofMatch>,
}

impl ItemScore {
    fn vetoed() -> Self {
        Self::default()
    }
}

/// Scores items against one profile and an optional celebrity outfit
///
/// Outfit signals are extracted once so repeated scoring over a catalog stays cheap.
pub struct ItemScorer<'a> {
    profile: &'a StyleProfile,
    social_proof: Option<(&'a SocialProofContext, OutfitSignals)>,
}

impl<'a> ItemScorer<'a> {
    pub fn new(profile: &'a StyleProfile, context: Option<&'a SocialProofContext>) -> Self {
        Self {
            profile,
            social_proof: context.map(|c| (c, OutfitSignals::extract(c))),
        }
    }

    pub fn profile(&self) -> &'a StyleProfile {
        self.profile
    }

    pub fn context(&self) -> Option<&'a SocialProofContext> {
        self.social_proof.as_ref().map(|(c, _)| *c)
    }

    /// Social proof match for the item, 0.0 without a context
    pub fn social_match(&self, item: &ClothingItem) -> f64 {
        match &self.social_proof {
            Some((context, signals)) if context.has_celebrity() => {
                match_signals(item, signals)
            }
            _ => 0.0,
        }
    }

    /// Whether the item carries a tag, color or pattern the user dislikes
    pub fn is_vetoed(&self, item: &ClothingItem) -> bool {
        let disliked = |dimension: &str, value: &str| {
            self.profile
                .is_negative(&format!("disliked_{}_{}", dimension, value.to_lowercase()))
        };

        item.style_tags.iter().any(|t| disliked("tag", t))
            || item.colors.iter().any(|c| disliked("color", c))
            || item.pattern_key().is_some_and(|p| disliked("pattern", &p))
    }

    pub fn score(&self, item: &ClothingItem) -> ItemScore {
        if self.is_vetoed(item) {
            return ItemScore::vetoed();
        }

        let mut reasons = Vec::new();

        let style = self.style_match(item, &mut reasons);
        let color = self.color_match(item, &mut reasons);
        let fit = self.fit_match(item, &mut reasons);
        let occasion = self.occasion_match(item, &mut reasons);
        let pattern = self.pattern_match(item, &mut reasons);

        let trending = item.trending_score.clamp(0.0, 1.0);
        if item.is_trending() {
            reasons.push("Currently trending".to_string());
        }

        let mut social_score = 0.0;
        let mut social_proof = None;
        if let Some(context) = self.context() {
            social_score = self.social_match(item);
            if social_score > 0.0 {
                reasons.push(format!("Inspired by {}'s style", context.celebrity));
            }
            if social_score > ATTRIBUTION_THRESHOLD {
                social_proof = Some(SocialProofMatch::from_context(context, social_score));
            }
        }

        let weights = ScoringWeights::for_flags(ScoringFlags {
            pattern: true,
            social_proof: self.social_proof.is_some(),
        });

        let score = style * weights.style
            + color * weights.color
            + fit * weights.fit
            + occasion * weights.occasion
            + trending * weights.trending
            + AVAILABILITY_BASELINE * weights.availability
            + pattern * weights.pattern
            + social_score * weights.social_proof;

        ItemScore {
            score,
            reasons: self.finalize_reasons(reasons),
            social_proof,
        }
    }

    fn positive_weight(&self, key: String) -> Option<f64> {
        self.profile.positive(&key)
    }

    fn style_match(&self, item: &ClothingItem, reasons: &mut Vec<String>) -> f64 {
        if item.style_tags.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for tag in &item.style_tags {
            let tag_key = tag.to_lowercase();
            if let Some(weight) = self.positive_weight(format!("style_{}", tag_key)) {
                total += weight;
                reasons.push(format!("Matches your {} style preference", tag));
            }
            if let Some(weight) = self.positive_weight(format!("liked_tag_{}", tag_key)) {
                total += weight;
                reasons.push("Similar to items you've liked".to_string());
            }
        }
        (total / item.style_tags.len() as f64).min(1.0)
    }

    fn color_match(&self, item: &ClothingItem, reasons: &mut Vec<String>) -> f64 {
        if item.colors.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for color in &item.colors {
            let color_key = color.to_lowercase();
            if let Some(weight) = self.positive_weight(format!("color_{}", color_key)) {
                total += weight;
                reasons.push(format!("Matches your {} color preference", color));
            }
            if let Some(weight) = self.positive_weight(format!("liked_color_{}", color_key)) {
                total += weight;
                reasons.push("Similar color to items you've liked".to_string());
            }
        }
        (total / item.colors.len() as f64).min(1.0)
    }

    fn fit_match(&self, item: &ClothingItem, reasons: &mut Vec<String>) -> f64 {
        let Some(fit) = item.fit_type.as_deref().filter(|f| !f.trim().is_empty()) else {
            return 0.0;
        };
        let fit_key = fit.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
        let key = if TOP_CATEGORIES.contains(&item.category_key().as_str()) {
            format!("top_fit_{}", fit_key)
        } else {
            format!("bottom_fit_{}", fit_key)
        };

        match self.profile.positive(&key) {
            Some(weight) => {
                reasons.push(format!("Matches your preferred {} fit", fit));
                weight.min(1.0)
            }
            None => 0.0,
        }
    }

    fn occasion_match(&self, item: &ClothingItem, reasons: &mut Vec<String>) -> f64 {
        if item.occasion_tags.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for occasion in &item.occasion_tags {
            let key = format!("occasion_{}", occasion.to_lowercase().replace(' ', "_"));
            if let Some(weight) = self.profile.positive(&key) {
                total += weight;
                reasons.push(format!("Great for {} occasions", occasion));
            }
        }
        (total / item.occasion_tags.len() as f64).min(1.0)
    }

    fn pattern_match(&self, item: &ClothingItem, reasons: &mut Vec<String>) -> f64 {
        let Some(pattern) = item.pattern.as_deref().filter(|p| !p.trim().is_empty()) else {
            return MISSING_PATTERN_SCORE;
        };
        let pattern_key = pattern.to_lowercase();

        let score = if let Some(weight) = self.positive_weight(format!("liked_pattern_{}", pattern_key)) {
            reasons.push(format!("Features your preferred {} pattern", pattern));
            weight
        } else if let Some(weight) = self.positive_weight(format!("pattern_{}", pattern_key)) {
            reasons.push(format!("Has a {} pattern that suits your style", pattern));
            weight
        } else if pattern_key == "solid" {
            reasons.push("Versatile solid pattern that pairs with anything".to_string());
            SOLID_PATTERN_SCORE
        } else {
            OTHER_PATTERN_SCORE
        };

        score.min(1.0)
    }

    /// Dedupes, moves social proof reasons to the front and caps the list
    fn finalize_reasons(&self, reasons: Vec<String>) -> Vec<String> {
        let mut unique: Vec<String> = Vec::with_capacity(reasons.len());
        for reason in reasons {
            if !unique.contains(&reason) {
                unique.push(reason);
            }
        }

        let celebrity = self
            .context()
            .map(|c| c.celebrity.as_str())
            .filter(|c| !c.trim().is_empty());
        let has_social = celebrity.is_some_and(|_| unique.iter().any(|r| r.starts_with("Inspired by")));

        let limit = match celebrity {
            Some(celebrity) if has_social => {
                let (mut social, other): (Vec<String>, Vec<String>) =
                    unique.into_iter().partition(|r| r.contains(celebrity));
                social.extend(other);
                unique = social;
                MAX_REASONS_WITH_SOCIAL_PROOF
            }
            _ => MAX_REASONS,
        };

        unique.truncate(limit);
        unique
    }
}

/// Scores one item against a profile and an optional celebrity outfit
pub fn score_item(
    item: &ClothingItem,
    profile: &StyleProfile,
    context: Option<&SocialProofContext>,
) -> ItemScore {
    ItemScorer::new(profile, context).score(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(entries: &[(&str, f64)]) -> StyleProfile {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn top(id: &str, color: &str) -> ClothingItem {
        let mut item = ClothingItem::new(id, "brand", "tops");
        item.colors = vec![color.to_string()];
        item
    }

    #[test]
    fn test_weights_sum_to_one_for_all_flags() {
        for pattern in [false, true] {
            for social_proof in [false, true] {
                let weights = ScoringWeights::for_flags(ScoringFlags { pattern, social_proof });
                assert!((weights.total() - 1.0).abs() < 1e-9);
            }
        }
        let both = ScoringWeights::for_flags(ScoringFlags { pattern: true, social_proof: true });
        assert!((both.style - 0.35 * 0.65).abs() < 1e-9);
        assert_eq!(both.social_proof, 0.2);
    }

    #[test]
    fn test_disliked_attributes_veto() {
        let profile = profile(&[
            ("color_red", 0.9),
            ("disliked_tag_busy", -1.0),
            ("disliked_color_orange", -1.0),
            ("disliked_pattern_plaid", -1.0),
        ]);

        let mut tagged = top("a", "red");
        tagged.style_tags = vec!["Busy".to_string()];
        tagged.trending_score = 1.0;
        assert_eq!(score_item(&tagged, &profile, None), ItemScore::default());

        let colored = top("b", "Orange");
        assert_eq!(score_item(&colored, &profile, None).score, 0.0);

        let mut patterned = top("c", "red");
        patterned.pattern = Some("plaid".to_string());
        let result = score_item(&patterned, &profile, None);
        assert_eq!(result.score, 0.0);
        assert!(result.reasons.is_empty());

        assert!(score_item(&top("d", "red"), &profile, None).score > 0.0);
    }

    #[test]
    fn test_component_scores_and_reasons() {
        let profile = profile(&[
            ("style_minimalist", 0.4),
            ("color_black", 0.5),
            ("top_fit_fitted", 0.3),
            ("occasion_casual", 0.2),
        ]);
        let mut item = top("a", "black");
        item.style_tags = vec!["minimalist".to_string(), "classic".to_string()];
        item.fit_type = Some("Fitted".to_string());
        item.occasion_tags = vec!["casual".to_string()];

        let result = score_item(&item, &profile, None);
        let weights = ScoringWeights::for_flags(ScoringFlags { pattern: true, social_proof: false });
        let expected = 0.2 * weights.style
            + 0.5 * weights.color
            + 0.3 * weights.fit
            + 0.2 * weights.occasion
            + weights.availability
            + 0.7 * weights.pattern;
        assert!((result.score - expected).abs() < 1e-9);
        assert_eq!(
            result.reasons,
            vec![
                "Matches your minimalist style preference".to_string(),
                "Matches your black color preference".to_string(),
                "Matches your preferred Fitted fit".to_string(),
            ]
        );
    }

    #[test]
    fn test_bottom_fit_uses_bottom_key() {
        let profile = profile(&[("bottom_fit_wide_leg", 0.5), ("top_fit_wide_leg", 0.9)]);
        let mut pants = ClothingItem::new("p", "brand", "pants");
        pants.fit_type = Some("Wide Leg".to_string());
        let result = score_item(&pants, &profile, None);
        assert_eq!(result.reasons, vec!["Matches your preferred Wide Leg fit".to_string()]);
    }

    #[test]
    fn test_pattern_defaults() {
        let empty = StyleProfile::new();
        let mut solid = top("s", "green");
        solid.pattern = Some("Solid".to_string());
        let mut floral = top("f", "green");
        floral.pattern = Some("floral".to_string());
        let plain = top("p", "green");

        let weights = ScoringWeights::for_flags(ScoringFlags { pattern: true, social_proof: false });
        let solid_score = score_item(&solid, &empty, None);
        assert!((solid_score.score - (0.8 * 0.15 + weights.availability)).abs() < 1e-9);
        assert_eq!(
            solid_score.reasons,
            vec!["Versatile solid pattern that pairs with anything".to_string()]
        );

        let floral_score = score_item(&floral, &empty, None);
        assert!((floral_score.score - (0.5 * 0.15 + weights.availability)).abs() < 1e-9);

        let plain_score = score_item(&plain, &empty, None);
        assert!((plain_score.score - (0.7 * 0.15 + weights.availability)).abs() < 1e-9);
        assert!(plain_score.reasons.is_empty());
    }

    #[test]
    fn test_missing_pattern_outranks_unpreferred_pattern() {
        let profile = profile(&[("color_black", 0.5)]);
        let plain = top("plain", "black");
        let mut floral = top("floral", "black");
        floral.pattern = Some("floral".to_string());

        let plain = score_item(&plain, &profile, None).score;
        let floral = score_item(&floral, &profile, None).score;
        assert!((plain - 0.2325).abs() < 1e-9, "plain scored {}", plain);
        assert!((floral - 0.2025).abs() < 1e-9, "floral scored {}", floral);
        assert!(plain > floral);
    }

    #[test]
    fn test_liked_pattern_takes_precedence() {
        let profile = profile(&[("liked_pattern_stripes", 0.2), ("pattern_stripes", 0.1)]);
        let mut item = top("a", "blue");
        item.pattern = Some("stripes".to_string());
        let result = score_item(&item, &profile, None);
        assert_eq!(result.reasons, vec!["Features your preferred stripes pattern".to_string()]);
    }

    #[test]
    fn test_reasons_are_deduplicated_and_capped() {
        let profile = profile(&[
            ("liked_tag_casual", 0.2),
            ("liked_tag_sporty", 0.2),
            ("color_blue", 0.3),
            ("color_white", 0.3),
            ("occasion_weekend", 0.1),
        ]);
        let mut item = top("a", "blue");
        item.colors.push("white".to_string());
        item.style_tags = vec!["casual".to_string(), "sporty".to_string()];
        item.occasion_tags = vec!["weekend".to_string()];
        item.trending_score = 0.9;

        let result = score_item(&item, &profile, None);
        assert_eq!(
            result.reasons,
            vec![
                "Similar to items you've liked".to_string(),
                "Matches your blue color preference".to_string(),
                "Matches your white color preference".to_string(),
            ]
        );
    }

    #[test]
    fn test_social_proof_reason_first_and_attribution() {
        let context = SocialProofContext::new("X")
            .with_colors(["black", "white"])
            .with_tags(["blazer"]);
        let profile = profile(&[("color_black", 0.5), ("style_classic", 0.5)]);

        let mut blazer = ClothingItem::new("b1", "brand", "outerwear");
        blazer.subcategory = Some("blazers".to_string());
        blazer.colors = vec!["black".to_string()];
        blazer.pattern = Some("solid".to_string());
        blazer.style_tags = vec!["classic".to_string()];
        blazer.trending_score = 0.8;

        let result = score_item(&blazer, &profile, Some(&context));
        assert_eq!(result.reasons.len(), 4);
        assert_eq!(result.reasons[0], "Inspired by X's style");
        let attribution = result.social_proof.expect("strong match is attributed");
        assert_eq!(attribution.celebrity, "X");
        assert!(attribution.match_score > 0.7);

        let mut dress = ClothingItem::new("d1", "brand", "dresses");
        dress.colors = vec!["red".to_string()];
        dress.pattern = Some("floral".to_string());
        let result = score_item(&dress, &profile, Some(&context));
        assert!(result.social_proof.is_none());
        assert!(!result.reasons.iter().any(|r| r.contains("Inspired by")));
    }
}

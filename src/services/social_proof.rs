//! Scores catalog items against a celebrity outfit description.
//!
//! Five components are scored independently. Structured context fields are used
//! when present; otherwise colors, patterns, fits and styles are mined from the
//! free-text description. Components the context says nothing about are left
//! out and the remaining weights renormalized.

use std::collections::BTreeSet;

use crate::models::{ClothingItem, SocialProofContext};

const GARMENT_WEIGHT: f64 = 0.30;
const COLOR_WEIGHT: f64 = 0.25;
const PATTERN_WEIGHT: f64 = 0.15;
const SILHOUETTE_WEIGHT: f64 = 0.15;
const STYLE_WEIGHT: f64 = 0.15;

/// Below this the item is not considered a match at all
pub const MIN_MATCH_SCORE: f64 = 0.4;

const GARMENT_KEYWORDS: &[&str] = &[
    "dress", "gown", "suit", "blazer", "jacket", "pants", "trousers", "skirt", "shirt",
    "blouse", "sweater", "coat", "shoes", "boots", "heels", "sneakers", "bag", "handbag",
    "clutch", "scarf", "hat", "top", "jeans", "shorts", "jumpsuit", "cardigan", "t-shirt",
    "tee", "tank", "camisole", "hoodie", "turtleneck", "tunic", "leggings", "culottes",
    "chinos", "joggers", "sweatpants", "maxi", "mini", "midi", "slip", "bodycon", "a-line",
    "shift", "wrap", "cocktail", "sheath", "sundress", "shirtdress", "romper", "trench",
    "parka", "peacoat", "denim", "leather", "bomber", "windbreaker", "cape", "poncho",
    "raincoat", "overcoat", "puffer", "flats", "loafers", "pumps", "ankle boots",
    "knee-high", "combat", "stilettos", "mules", "clogs", "wedges", "espadrilles",
    "oxfords", "slippers", "platforms", "purse", "tote", "backpack", "satchel", "crossbody",
    "shoulder bag",
];

/// Specific garment names and the catalog category they belong to
const GARMENT_FAMILIES: &[(&str, &[&str])] = &[
    (
        "shoes",
        &[
            "boots", "heels", "sneakers", "flats", "loafers", "pumps", "stilettos", "mules",
            "clogs", "wedges", "espadrilles", "oxfords", "slippers", "platforms",
        ],
    ),
    (
        "tops",
        &["blouse", "t-shirt", "tee", "tank", "camisole", "hoodie", "turtleneck", "tunic"],
    ),
    ("pants", &["trousers", "culottes", "chinos", "joggers", "sweatpants"]),
    (
        "dresses",
        &[
            "gown", "maxi", "mini", "midi", "slip", "bodycon", "a-line", "shift", "wrap",
            "cocktail", "sheath", "sundress", "shirtdress",
        ],
    ),
    (
        "outerwear",
        &[
            "blazer", "trench", "parka", "peacoat", "bomber", "windbreaker", "cape", "poncho",
            "raincoat", "overcoat", "puffer",
        ],
    ),
    (
        "bags",
        &["clutch", "purse", "tote", "backpack", "satchel", "crossbody", "shoulder bag"],
    ),
];

/// Generic garment names paired with the broad set of categories they cover
const BROAD_GARMENT_FAMILIES: &[(&[&str], &[&str])] = &[
    (
        &["top", "shirt", "sweater", "blouse", "t-shirt", "tee"],
        &["tops", "shirts", "t-shirts", "blouses", "sweaters"],
    ),
    (
        &["pants", "bottoms", "jeans", "skirt", "shorts"],
        &["bottoms", "pants", "jeans", "skirts", "shorts"],
    ),
    (&["dress", "gown"], &["dresses"]),
    (
        &["jacket", "coat", "blazer"],
        &["outerwear", "jackets", "coats", "blazers"],
    ),
    (&["shoes", "footwear", "boots", "heels"], &["shoes", "footwear"]),
];

/// Category keywords looked for in the description when no garment matched directly
const BASIC_CATEGORIES: &[(&str, &[&str])] = &[
    ("tops", &["top", "shirt", "blouse", "t-shirt", "tee", "sweater"]),
    ("bottoms", &["pants", "jeans", "skirt", "shorts", "trousers"]),
    ("dresses", &["dress", "gown", "jumpsuit"]),
    ("outerwear", &["jacket", "coat", "blazer", "cardigan"]),
    ("shoes", &["shoes", "boots", "heels", "sandals", "sneakers"]),
    ("accessories", &["bag", "purse", "handbag", "jewelry", "scarf", "hat"]),
];

const COLOR_KEYWORDS: &[&str] = &[
    "black", "white", "red", "blue", "green", "yellow", "purple", "pink", "gray", "grey",
    "brown", "tan", "beige", "cream", "ivory", "navy", "teal", "burgundy", "maroon", "gold",
    "silver", "orange",
];

const SIMILAR_COLORS: &[(&[&str], &[&str])] = &[
    (&["navy", "dark blue"], &["blue"]),
    (&["beige", "tan", "khaki"], &["cream", "sand", "stone"]),
    (&["burgundy", "maroon", "wine"], &["red", "crimson"]),
    (&["gray", "grey"], &["silver", "charcoal"]),
    (&["forest green", "hunter green"], &["green", "olive"]),
];

const NEUTRAL_COLORS: &[&str] = &["black", "white", "gray", "grey", "beige", "navy"];

/// Pattern names recognized in outfit descriptions
pub const PATTERN_KEYWORDS: &[&str] = &[
    "striped", "stripes", "plaid", "checked", "checkered", "polka dot", "floral",
    "animal print", "leopard", "zebra", "snake", "geometric", "abstract", "solid", "plain",
    "textured", "embroidered", "sequined", "beaded",
];

const PATTERN_FAMILIES: &[&[&str]] = &[
    &["striped", "stripes", "pinstripe", "pinstriped"],
    &["plaid", "checked", "checkered", "tartan"],
    &["animal", "leopard", "zebra", "snake", "cheetah", "tiger"],
    &["floral", "flower", "botanical", "tropical"],
    &["polka dot", "polka", "dotted", "spots"],
    &["geometric", "abstract", "graphic"],
    &["embroidered", "embroidery", "needlework"],
    &["sequined", "sequin", "sequins", "beaded", "embellished"],
];

const FIT_KEYWORDS: &[&str] = &[
    "oversized", "baggy", "loose", "fitted", "slim", "skinny", "tight", "cropped",
    "high-waisted", "low-rise", "flared", "straight-leg", "wide-leg", "bootcut", "relaxed",
    "structured", "tailored", "unstructured", "boxy", "bodycon", "a-line", "empire",
    "drop-waist", "peplum", "pencil",
];

const FIT_GROUPS: &[&[&str]] = &[
    &["oversized", "baggy", "loose", "relaxed", "boyfriend"],
    &["fitted", "slim", "skinny", "tight", "bodycon"],
    &["structured", "tailored"],
    &["cropped", "high-waisted"],
    &["flared", "wide-leg", "bootcut"],
    &["straight-leg", "classic", "regular"],
];

const STYLE_KEYWORDS: &[&str] = &[
    "casual", "formal", "elegant", "chic", "minimalist", "bold", "classic", "vintage",
    "retro", "preppy", "bohemian", "boho", "edgy", "streetwear", "glamorous", "sporty",
    "athleisure", "business", "professional", "feminine", "masculine", "androgynous",
    "romantic", "punk", "grunge", "hip-hop", "sophisticated", "trendy", "timeless", "modern",
    "contemporary", "urban", "festival", "party", "lounge", "vacation", "resort", "beach",
    "office", "workwear", "cocktail", "evening", "black tie",
];

const STYLE_GROUPS: &[&[&str]] = &[
    &["casual", "relaxed", "comfortable", "everyday", "lounge"],
    &["formal", "elegant", "sophisticated", "dressy", "black tie", "cocktail", "evening"],
    &["minimalist", "clean", "simple", "streamlined"],
    &["vintage", "retro", "classic", "timeless"],
    &["bohemian", "boho", "free-spirited", "eclectic"],
    &["edgy", "punk", "grunge", "rock", "alternative"],
    &["sporty", "athleisure", "active", "athletic"],
    &["streetwear", "urban", "hip-hop", "street style"],
    &["professional", "business", "workwear", "office"],
    &["trendy", "fashion-forward", "contemporary", "modern"],
];

/// Lowercased text with punctuation turned into spaces and padded for whole-word lookups
fn word_text(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { ' ' })
        .collect();
    format!(" {} ", cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Whether `keyword` appears as a whole word (or phrase) in text prepared by [`word_text`]
fn mentions(words: &str, keyword: &str) -> bool {
    words.contains(&format!(" {} ", keyword))
}

fn mined<'a>(sources: &[String], keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|k| sources.iter().any(|s| mentions(s, k)))
        .collect()
}

fn lowercased(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Signals extracted from a context once, then reused for every item
#[derive(Debug, Clone, Default)]
pub struct OutfitSignals {
    garments: Vec<&'static str>,
    description: String,
    colors: Vec<String>,
    patterns: Vec<String>,
    fits: Vec<&'static str>,
    styles: BTreeSet<&'static str>,
}

impl OutfitSignals {
    pub fn extract(context: &SocialProofContext) -> Self {
        let description = word_text(&context.outfit_description);
        let tags: Vec<String> = context.outfit_tags.iter().map(|t| word_text(t)).collect();
        let tags_and_description: Vec<String> =
            tags.iter().cloned().chain([description.clone()]).collect();

        let mut colors = lowercased(&context.colors);
        if colors.is_empty() {
            colors = mined(&[description.clone()], COLOR_KEYWORDS)
                .into_iter()
                .map(str::to_string)
                .collect();
        }

        let mut patterns = lowercased(&context.patterns);
        if patterns.is_empty() {
            patterns = mined(&[description.clone()], PATTERN_KEYWORDS)
                .into_iter()
                .map(str::to_string)
                .collect();
        }

        Self {
            garments: mined(&tags_and_description, GARMENT_KEYWORDS),
            colors,
            patterns,
            fits: mined(&tags_and_description, FIT_KEYWORDS),
            styles: mined(&tags_and_description, STYLE_KEYWORDS).into_iter().collect(),
            description,
        }
    }

    fn names_garment(&self) -> bool {
        !self.garments.is_empty()
            || BASIC_CATEGORIES
                .iter()
                .any(|(_, keywords)| keywords.iter().any(|k| mentions(&self.description, k)))
    }
}

fn same_garment(garment: &str, category: &str) -> bool {
    !category.is_empty() && (garment == category || format!("{}s", garment) == category)
}

fn garment_score(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let category = item.category_key();
    let subcategory = item.subcategory_key().unwrap_or_default();

    let mut best: f64 = 0.0;
    for garment in &signals.garments {
        let score = if same_garment(garment, &category) || same_garment(garment, &subcategory) {
            1.0
        } else if GARMENT_FAMILIES
            .iter()
            .any(|(family, names)| *family == category && names.contains(garment))
        {
            0.8
        } else if BROAD_GARMENT_FAMILIES
            .iter()
            .any(|(names, categories)| names.contains(garment) && categories.contains(&category.as_str()))
        {
            0.6
        } else {
            0.0
        };
        best = best.max(score);
    }

    if best == 0.0 {
        let basic_hit = BASIC_CATEGORIES.iter().any(|(basic, keywords)| {
            keywords.iter().any(|k| mentions(&signals.description, k))
                && (*basic == category || keywords.iter().any(|k| !subcategory.is_empty() && subcategory.contains(k)))
        });
        if basic_hit {
            best = 0.5;
        }
    }

    best
}

fn any_in(colors: &[String], group: &[&str]) -> bool {
    colors.iter().any(|c| group.contains(&c.as_str()))
}

fn color_score(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let item_colors = lowercased(&item.colors);
    if item_colors.is_empty() {
        return 0.0;
    }
    let has_neutral = item_colors.iter().any(|c| NEUTRAL_COLORS.contains(&c.as_str()));

    if signals.colors.is_empty() {
        return if has_neutral { 0.3 } else { 0.0 };
    }

    let overlap = item_colors
        .iter()
        .filter(|c| signals.colors.contains(c))
        .collect::<BTreeSet<_>>()
        .len();
    if overlap > 0 {
        let smaller = item_colors.len().min(signals.colors.len());
        return (overlap as f64 / smaller as f64).min(1.0);
    }

    let similar = SIMILAR_COLORS.iter().any(|(left, right)| {
        (any_in(&signals.colors, left) && any_in(&item_colors, right))
            || (any_in(&signals.colors, right) && any_in(&item_colors, left))
    });
    if similar {
        0.5
    } else if has_neutral {
        0.3
    } else {
        0.0
    }
}

fn pattern_score(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let Some(pattern) = item.pattern_key() else {
        return 0.0;
    };

    if signals.patterns.is_empty() {
        return if pattern == "solid" || pattern == "plain" { 0.3 } else { 0.0 };
    }

    if signals.patterns.contains(&pattern) {
        return 1.0;
    }
    if signals
        .patterns
        .iter()
        .any(|p| p.contains(&pattern) || pattern.contains(p.as_str()))
    {
        return 0.7;
    }

    let same_family = PATTERN_FAMILIES.iter().any(|family| {
        signals
            .patterns
            .iter()
            .any(|p| family.iter().any(|f| p.contains(f)))
            && family.iter().any(|f| pattern.contains(f))
    });
    if same_family {
        0.6
    } else {
        0.0
    }
}

fn silhouette_score(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let item_fit = item
        .fit_type
        .as_deref()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());
    let tag_fits: Vec<String> = lowercased(&item.style_tags)
        .into_iter()
        .filter(|t| FIT_KEYWORDS.contains(&t.as_str()))
        .collect();

    if item_fit.is_none() && tag_fits.is_empty() {
        return 0.0;
    }

    if item_fit
        .as_deref()
        .is_some_and(|fit| signals.fits.contains(&fit))
    {
        return 1.0;
    }
    if tag_fits.iter().any(|t| signals.fits.contains(&t.as_str())) {
        return 0.8;
    }

    let complementary = FIT_GROUPS.iter().any(|group| {
        signals.fits.iter().any(|f| group.contains(f))
            && (tag_fits.iter().any(|t| group.contains(&t.as_str()))
                || item_fit.as_deref().is_some_and(|fit| group.contains(&fit)))
    });
    if complementary {
        0.7
    } else {
        0.0
    }
}

fn style_score(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let item_styles: BTreeSet<String> = lowercased(&item.style_tags).into_iter().collect();
    if item_styles.is_empty() || signals.styles.is_empty() {
        return 0.0;
    }

    let overlap = signals
        .styles
        .iter()
        .filter(|s| item_styles.contains(**s))
        .count();
    if overlap > 0 {
        return overlap as f64 / signals.styles.len() as f64;
    }

    let complementary = STYLE_GROUPS.iter().any(|group| {
        signals.styles.iter().any(|s| group.contains(s))
            && item_styles.iter().any(|s| group.contains(&s.as_str()))
    });
    if complementary {
        0.6
    } else {
        0.0
    }
}

/// Match strength of an item against precomputed outfit signals, in `[0, 1]`
pub fn match_signals(item: &ClothingItem, signals: &OutfitSignals) -> f64 {
    let mut components = vec![
        (COLOR_WEIGHT, color_score(item, signals)),
        (PATTERN_WEIGHT, pattern_score(item, signals)),
    ];
    if signals.names_garment() {
        components.push((GARMENT_WEIGHT, garment_score(item, signals)));
    }
    if !signals.fits.is_empty() {
        components.push((SILHOUETTE_WEIGHT, silhouette_score(item, signals)));
    }
    if !signals.styles.is_empty() {
        components.push((STYLE_WEIGHT, style_score(item, signals)));
    }

    let active_weight: f64 = components.iter().map(|(w, _)| w).sum();
    let score = components.iter().map(|(w, s)| w * s).sum::<f64>() / active_weight;

    if score < MIN_MATCH_SCORE {
        0.0
    } else {
        score.min(1.0)
    }
}

/// Match strength of an item against a celebrity outfit, in `[0, 1]`
///
/// Returns 0.0 for weak matches and for contexts without a celebrity.
pub fn match_social_proof(item: &ClothingItem, context: &SocialProofContext) -> f64 {
    if !context.has_celebrity() {
        return 0.0;
    }
    match_signals(item, &OutfitSignals::extract(context))
}

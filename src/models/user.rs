use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall style categories offered by the style quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    Classic,
    Minimalist,
    Trendy,
    Edgy,
    Sporty,
    Bohemian,
}

/// Color palettes offered by the style quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColorPalette {
    Neutrals,
    EarthTones,
    Pastels,
    Bold,
    Monochrome,
}

/// Preferred fit for tops
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitPreference {
    Oversized,
    Fitted,
    Cropped,
    Structured,
}

/// Occasions a user dresses for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OccasionType {
    Casual,
    Business,
    Streetwear,
    DateNight,
    Formal,
}

/// Budget band selected in the quiz
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRange {
    Low,
    MediumLow,
    MediumHigh,
    High,
}

/// Quiz option that has a profile key and a human-readable label
///
/// Parsing accepts either the key ("date_night") or the label shown in the quiz
/// ("Date Night & Going Out"), case-insensitively.
pub trait QuizOption: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Key fragment used in style profile keys
    fn key(self) -> &'static str;

    /// Label as presented in the quiz
    fn label(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let needle = value.trim().to_lowercase();
        let normalized = needle.replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.key() == normalized || option.label().to_lowercase() == needle)
    }
}

impl QuizOption for StyleCategory {
    const ALL: &'static [Self] = &[
        Self::Classic,
        Self::Minimalist,
        Self::Trendy,
        Self::Edgy,
        Self::Sporty,
        Self::Bohemian,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Minimalist => "minimalist",
            Self::Trendy => "trendy",
            Self::Edgy => "edgy",
            Self::Sporty => "sporty",
            Self::Bohemian => "bohemian",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic & Timeless",
            Self::Minimalist => "Minimalist & Clean",
            Self::Trendy => "Trendy & Fashion-Forward",
            Self::Edgy => "Edgy & Alternative",
            Self::Sporty => "Sporty & Casual",
            Self::Bohemian => "Bohemian & Free-Spirited",
        }
    }
}

impl QuizOption for ColorPalette {
    const ALL: &'static [Self] = &[
        Self::Neutrals,
        Self::EarthTones,
        Self::Pastels,
        Self::Bold,
        Self::Monochrome,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Neutrals => "neutrals",
            Self::EarthTones => "earth_tones",
            Self::Pastels => "pastels",
            Self::Bold => "bold",
            Self::Monochrome => "monochrome",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Neutrals => "Neutrals",
            Self::EarthTones => "Earthy Tones",
            Self::Pastels => "Pastels",
            Self::Bold => "Bold & Bright Colors",
            Self::Monochrome => "Monochrome or All-Black",
        }
    }
}

impl QuizOption for FitPreference {
    const ALL: &'static [Self] = &[Self::Oversized, Self::Fitted, Self::Cropped, Self::Structured];

    fn key(self) -> &'static str {
        match self {
            Self::Oversized => "oversized",
            Self::Fitted => "fitted",
            Self::Cropped => "cropped",
            Self::Structured => "structured",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Oversized => "Oversized & Relaxed",
            Self::Fitted => "Slim & Fitted",
            Self::Cropped => "Cropped",
            Self::Structured => "Boxy & Structured",
        }
    }
}

impl QuizOption for OccasionType {
    const ALL: &'static [Self] = &[
        Self::Casual,
        Self::Business,
        Self::Streetwear,
        Self::DateNight,
        Self::Formal,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Business => "business",
            Self::Streetwear => "streetwear",
            Self::DateNight => "date_night",
            Self::Formal => "formal",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Casual => "Everyday Casual",
            Self::Business => "Workwear & Business Casual",
            Self::Streetwear => "Streetwear & Trendy Looks",
            Self::DateNight => "Date Night & Going Out",
            Self::Formal => "Formal & Special Events",
        }
    }
}

impl QuizOption for BudgetRange {
    const ALL: &'static [Self] = &[Self::Low, Self::MediumLow, Self::MediumHigh, Self::High];

    fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::MediumLow => "medium_low",
            Self::MediumHigh => "medium_high",
            Self::High => "high",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Under $50",
            Self::MediumLow => "$50 - $100",
            Self::MediumHigh => "$100 - $250",
            Self::High => "$250+",
        }
    }
}

/// Results of the style quiz with every option resolved to a known value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StyleQuizResults {
    pub overall_style: Vec<StyleCategory>,
    pub priorities: Vec<String>,
    pub color_palette: Vec<ColorPalette>,
    pub pattern_preference: Option<String>,
    pub preferred_patterns: Vec<String>,
    pub top_fit: Vec<FitPreference>,
    pub bottom_fit: Vec<String>,
    pub layering_preference: Option<String>,
    pub occasion_preferences: Vec<OccasionType>,
    pub shoe_preference: Vec<String>,
    pub accessory_preference: Vec<String>,
    pub favorite_brands: Vec<String>,
    pub shopping_frequency: Option<String>,
    pub budget_range: Option<BudgetRange>,
    pub sustainability_priority: bool,
    pub secondhand_interest: bool,
    pub seasonal_preference: Option<String>,
    pub trend_following: Option<String>,
    pub style_statement: Option<String>,
}

/// Quiz answers exactly as submitted by a client
///
/// Enumerated answers stay raw strings here; [`StyleQuizAnswers::parse`] resolves
/// them and drops anything it does not recognise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StyleQuizAnswers {
    pub overall_style: Vec<String>,
    pub priorities: Vec<String>,
    pub color_palette: Vec<String>,
    pub pattern_preference: Option<String>,
    pub preferred_patterns: Vec<String>,
    pub top_fit: Vec<String>,
    pub bottom_fit: Vec<String>,
    pub layering_preference: Option<String>,
    pub occasion_preferences: Vec<String>,
    pub shoe_preference: Vec<String>,
    pub accessory_preference: Vec<String>,
    pub favorite_brands: Vec<String>,
    pub shopping_frequency: Option<String>,
    pub budget_range: Option<String>,
    pub sustainability_priority: bool,
    pub secondhand_interest: bool,
    pub seasonal_preference: Option<String>,
    pub trend_following: Option<String>,
    pub style_statement: Option<String>,
}

fn parse_options<T: QuizOption>(field: &'static str, values: &[String]) -> Vec<T> {
    let mut parsed = Vec::new();
    for value in values {
        match T::parse(value) {
            Some(option) if !parsed.iter().any(|o: &T| o.key() == option.key()) => parsed.push(option),
            Some(_) => {}
            None => tracing::warn!(field, value = %value, "Unknown quiz answer, skipping"),
        }
    }
    parsed
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StyleQuizAnswers {
    /// Resolves raw answers into typed quiz results
    pub fn parse(self) -> StyleQuizResults {
        let budget_range = non_empty(self.budget_range).and_then(|raw| {
            let parsed = BudgetRange::parse(&raw);
            if parsed.is_none() {
                tracing::warn!(field = "budget_range", value = %raw, "Unknown quiz answer, skipping");
            }
            parsed
        });

        StyleQuizResults {
            overall_style: parse_options("overall_style", &self.overall_style),
            priorities: self.priorities,
            color_palette: parse_options("color_palette", &self.color_palette),
            pattern_preference: non_empty(self.pattern_preference),
            preferred_patterns: self.preferred_patterns,
            top_fit: parse_options("top_fit", &self.top_fit),
            bottom_fit: self.bottom_fit,
            layering_preference: non_empty(self.layering_preference),
            occasion_preferences: parse_options("occasion_preferences", &self.occasion_preferences),
            shoe_preference: self.shoe_preference,
            accessory_preference: self.accessory_preference,
            favorite_brands: self.favorite_brands,
            shopping_frequency: non_empty(self.shopping_frequency),
            budget_range,
            sustainability_priority: self.sustainability_priority,
            secondhand_interest: self.secondhand_interest,
            seasonal_preference: non_empty(self.seasonal_preference),
            trend_following: non_empty(self.trend_following),
            style_statement: non_empty(self.style_statement),
        }
    }
}

/// An item the user already owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosetItem {
    pub item_id: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub worn_count: u32,
    #[serde(default)]
    pub last_worn: Option<DateTime<Utc>>,
}

impl ClosetItem {
    pub fn new(item_id: impl Into<String>, category: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            category: category.into(),
            subcategory: None,
            color: color.into(),
            brand: None,
            size: None,
            pattern: None,
            tags: Vec::new(),
            favorite: false,
            worn_count: 0,
            last_worn: None,
        }
    }

    /// Colors as a list, for compatibility checks against catalog items
    pub fn colors(&self) -> Vec<String> {
        if self.color.is_empty() {
            Vec::new()
        } else {
            vec![self.color.clone()]
        }
    }

    /// Applies a single field update
    pub fn apply(&mut self, update: ClosetItemUpdate) {
        match update {
            ClosetItemUpdate::Category(category) => self.category = category,
            ClosetItemUpdate::Subcategory(subcategory) => self.subcategory = subcategory,
            ClosetItemUpdate::Color(color) => self.color = color,
            ClosetItemUpdate::Brand(brand) => self.brand = brand,
            ClosetItemUpdate::Size(size) => self.size = size,
            ClosetItemUpdate::Pattern(pattern) => self.pattern = pattern,
            ClosetItemUpdate::Tags(tags) => self.tags = tags,
            ClosetItemUpdate::Favorite(favorite) => self.favorite = favorite,
            ClosetItemUpdate::MarkWorn(at) => {
                self.worn_count += 1;
                self.last_worn = Some(at);
            }
        }
    }
}

/// The closed set of edits a client may make to a closet item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ClosetItemUpdate {
    Category(String),
    Subcategory(Option<String>),
    Color(String),
    Brand(Option<String>),
    Size(Option<String>),
    Pattern(Option<String>),
    Tags(Vec<String>),
    Favorite(bool),
    MarkWorn(DateTime<Utc>),
}

/// Explicit likes and dislikes collected from the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserFeedback {
    pub liked_items: BTreeSet<String>,
    pub disliked_items: BTreeSet<String>,
    pub saved_outfits: Vec<Vec<String>>,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl UserFeedback {
    /// Records a like or dislike, moving the id out of the opposite set
    pub fn record(&mut self, item_id: &str, liked: bool, at: DateTime<Utc>) {
        if liked {
            self.disliked_items.remove(item_id);
            self.liked_items.insert(item_id.to_string());
        } else {
            self.liked_items.remove(item_id);
            self.disliked_items.insert(item_id.to_string());
        }
        self.last_interaction = Some(at);
    }

    /// Saves an outfit unless an identical one is already saved
    pub fn save_outfit(&mut self, item_ids: Vec<String>, at: DateTime<Utc>) -> bool {
        self.last_interaction = Some(at);
        if self.saved_outfits.contains(&item_ids) {
            return false;
        }
        self.saved_outfits.push(item_ids);
        true
    }
}

/// Everything known about a user that feeds recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closet_items: Vec<ClosetItem>,
    #[serde(default)]
    pub style_quiz: Option<StyleQuizResults>,
    #[serde(default)]
    pub feedback: UserFeedback,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            closet_items: Vec::new(),
            style_quiz: None,
            feedback: UserFeedback::default(),
        }
    }

    pub fn with_quiz(mut self, quiz: StyleQuizResults) -> Self {
        self.style_quiz = Some(quiz);
        self
    }

    pub fn closet_item_mut(&mut self, item_id: &str) -> Option<&mut ClosetItem> {
        self.closet_items.iter_mut().find(|i| i.item_id == item_id)
    }

    /// Adds a closet item, replacing any existing item with the same id
    pub fn add_closet_item(&mut self, item: ClosetItem) {
        if let Some(existing) = self.closet_item_mut(&item.item_id) {
            *existing = item;
        } else {
            self.closet_items.push(item);
        }
    }

    pub fn remove_closet_item(&mut self, item_id: &str) -> Option<ClosetItem> {
        let index = self.closet_items.iter().position(|i| i.item_id == item_id)?;
        Some(self.closet_items.remove(index))
    }

    /// Brands the user has signalled they like: quiz favorites plus brands of favorite closet items
    pub fn favorite_brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = Vec::new();
        let quiz_brands = self
            .style_quiz
            .iter()
            .flat_map(|q| q.favorite_brands.iter().cloned());
        let closet_brands = self
            .closet_items
            .iter()
            .filter(|i| i.favorite)
            .filter_map(|i| i.brand.clone());

        for brand in quiz_brands.chain(closet_brands) {
            let brand = brand.trim().to_lowercase();
            if !brand.is_empty() && !brands.contains(&brand) {
                brands.push(brand);
            }
        }
        brands
    }
}

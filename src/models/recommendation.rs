use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SocialProofContext;

/// Attribution of a recommendation to a celebrity outfit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialProofMatch {
    pub celebrity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    pub match_score: f64,
}

impl SocialProofMatch {
    pub fn from_context(context: &SocialProofContext, match_score: f64) -> Self {
        Self {
            celebrity: context.celebrity.clone(),
            event: context.event_name().map(str::to_string),
            match_score,
        }
    }
}

/// A single recommended catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRecommendation {
    pub item_id: String,
    pub score: f64,
    pub match_reasons: Vec<String>,
    pub complementary_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_proof: Option<SocialProofMatch>,
}

impl ItemRecommendation {
    /// Natural-language sentence built from the match reasons
    pub fn explanation(&self) -> String {
        match self.match_reasons.as_slice() {
            [] => "This item matches your style preferences.".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{} and {}.", first, second),
            [init @ .., last] => format!("{}, and {}.", init.join(", "), last),
        }
    }
}

/// A complete look assembled around an anchor item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutfitRecommendation {
    pub outfit_id: String,
    /// Item ids, anchor first
    pub items: Vec<String>,
    pub score: f64,
    pub occasion: String,
    pub match_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_proof: Option<SocialProofMatch>,
}

/// Everything produced for one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub recommended_items: Vec<ItemRecommendation>,
    pub recommended_outfits: Vec<OutfitRecommendation>,
    pub recommendation_context: Option<String>,
}

impl RecommendationResponse {
    /// Response with no recommendations
    pub fn empty(user_id: impl Into<String>, context: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: Utc::now(),
            recommended_items: Vec::new(),
            recommended_outfits: Vec::new(),
            recommendation_context: context,
        }
    }
}

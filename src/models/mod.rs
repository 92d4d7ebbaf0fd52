pub mod clothing;
pub mod recommendation;
pub mod social_proof;
pub mod user;

pub use clothing::{ClothingItem, TRENDING_THRESHOLD};
pub use recommendation::{
    ItemRecommendation, OutfitRecommendation, RecommendationResponse, SocialProofMatch,
};
pub use social_proof::{find_by_celebrity, SocialProofContext};
pub use user::{
    BudgetRange, ClosetItem, ClosetItemUpdate, ColorPalette, FitPreference, OccasionType,
    QuizOption, StyleCategory, StyleQuizAnswers, StyleQuizResults, UserFeedback, UserProfile,
};

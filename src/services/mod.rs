pub mod catalog;
pub mod compatibility;
pub mod outfits;
pub mod recommendations;
pub mod scoring;
pub mod similar;
pub mod social_proof;
pub mod style_profile;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use compatibility::{colors_compatible, patterns_compatible};
pub use outfits::{build_outfit, complete_outfit, find_complementary};
pub use recommendations::{generate_recommendations, PriorityMerge, RecommendationSettings};
pub use scoring::{score_item, ItemScore, ItemScorer, ScoringFlags, ScoringWeights};
pub use similar::{find_similar, similarity};
pub use social_proof::match_social_proof;
pub use style_profile::{build_style_profile, StyleProfile};

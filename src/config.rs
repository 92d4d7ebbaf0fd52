use serde::Deserialize;

use crate::services::RecommendationSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the catalog; the catalog starts empty when unset
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Maximum number of recommended items per request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Complementary items attached to each recommendation
    #[serde(default = "default_complementary_limit")]
    pub complementary_limit: usize,

    /// Top recommendations used as outfit anchors
    #[serde(default = "default_outfit_anchors")]
    pub outfit_anchors: usize,

    /// Minimum score an outfit must exceed to be returned
    #[serde(default = "default_min_outfit_score")]
    pub min_outfit_score: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_recommendations() -> usize {
    20
}

fn default_complementary_limit() -> usize {
    3
}

fn default_outfit_anchors() -> usize {
    5
}

fn default_min_outfit_score() -> f64 {
    0.6
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Engine settings derived from this configuration
    pub fn recommendation_settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            max_recommendations: self.max_recommendations,
            complementary_limit: self.complementary_limit,
            outfit_anchors: self.outfit_anchors,
            min_outfit_score: self.min_outfit_score,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.recommendation_settings(), RecommendationSettings::default());
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("CATALOG_PATH".to_string(), "catalog.json".to_string()),
            ("MAX_RECOMMENDATIONS".to_string(), "10".to_string()),
            ("MIN_OUTFIT_SCORE".to_string(), "0.5".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_path.as_deref(), Some("catalog.json"));

        let settings = config.recommendation_settings();
        assert_eq!(settings.max_recommendations, 10);
        assert_eq!(settings.min_outfit_score, 0.5);
        assert_eq!(settings.complementary_limit, 3);
    }
}

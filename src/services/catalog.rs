use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::ClothingItem,
};

/// Source of catalog snapshots
///
/// Retailer integrations plug in here. The engine only ever sees the immutable
/// snapshot a provider returns, so a provider is free to refresh or cache behind
/// this call.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Current catalog snapshot
    async fn fetch_catalog(&self) -> AppResult<Arc<Vec<ClothingItem>>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Catalog held in memory, optionally seeded from a JSON file
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<Arc<Vec<ClothingItem>>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self {
            items: RwLock::new(Arc::new(items)),
        }
    }

    /// Loads a JSON array of clothing items
    #[instrument]
    pub async fn from_json_file(path: impl AsRef<Path> + std::fmt::Debug) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await.map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        let items = Self::parse(&raw)?;
        tracing::info!(count = items.len(), "Loaded catalog from file");
        Ok(Self::new(items))
    }

    /// Parses a JSON array of clothing items, dropping entries without an id
    pub fn parse(raw: &str) -> AppResult<Vec<ClothingItem>> {
        let items: Vec<ClothingItem> = serde_json::from_str(raw)
            .map_err(|e| AppError::Catalog(format!("Invalid catalog JSON: {}", e)))?;

        let total = items.len();
        let items: Vec<ClothingItem> = items
            .into_iter()
            .filter(|item| !item.item_id.trim().is_empty())
            .collect();
        if items.len() < total {
            tracing::warn!(skipped = total - items.len(), "Skipped catalog items without an id");
        }
        Ok(items)
    }

    /// Replaces the catalog; snapshots already handed out are unaffected
    pub async fn replace(&self, items: Vec<ClothingItem>) {
        *self.items.write().await = Arc::new(items);
    }
}

#[async_trait::async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch_catalog(&self) -> AppResult<Arc<Vec<ClothingItem>>> {
        Ok(Arc::clone(&*self.items.read().await))
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

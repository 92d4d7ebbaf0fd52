use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::UserProfile;
use crate::services::{CatalogProvider, InMemoryCatalog, RecommendationSettings};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub catalog: Arc<dyn CatalogProvider>,
    pub settings: Arc<RecommendationSettings>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub users: HashMap<String, UserProfile>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a state with an empty catalog and default engine settings
    pub fn new() -> Self {
        Self::with_catalog(Arc::new(InMemoryCatalog::default()), RecommendationSettings::default())
    }

    pub fn with_catalog(catalog: Arc<dyn CatalogProvider>, settings: RecommendationSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
            catalog,
            settings: Arc::new(settings),
        }
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::{
    ClosetItem, ClosetItemUpdate, ClothingItem, OutfitRecommendation, RecommendationResponse,
    SocialProofContext, StyleQuizAnswers, UserProfile,
};
use crate::services::{build_style_profile, complete_outfit, find_similar, generate_recommendations};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: String,
    #[serde(default)]
    pub style_quiz: Option<StyleQuizAnswers>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveOutfitRequest {
    pub item_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveOutfitResponse {
    pub saved: bool,
    pub saved_outfits: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub social_proof: Option<SocialProofContext>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarItemsQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteOutfitRequest {
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

const DEFAULT_SIMILAR_LIMIT: usize = 10;
const DEFAULT_COMPLETION_LIMIT: usize = 5;

fn require_id(value: &str, what: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn user_not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("User {}", user_id))
}

async fn load_user(state: &AppState, user_id: &str) -> AppResult<UserProfile> {
    let inner = state.inner.read().await;
    inner
        .users
        .get(user_id)
        .cloned()
        .ok_or_else(|| user_not_found(user_id))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current catalog snapshot
pub async fn get_catalog(State(state): State<AppState>) -> AppResult<Json<Vec<ClothingItem>>> {
    let catalog = state.catalog.fetch_catalog().await?;
    Ok(Json(catalog.as_ref().clone()))
}

/// Create a user, resolving raw quiz answers
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    require_id(&request.user_id, "user_id")?;

    let mut user = UserProfile::new(request.user_id.trim());
    if let Some(answers) = request.style_quiz {
        user = user.with_quiz(answers.parse());
    }

    let mut inner = state.inner.write().await;
    if inner.users.contains_key(&user.user_id) {
        return Err(AppError::InvalidInput(format!("User {} already exists", user.user_id)));
    }
    inner.users.insert(user.user_id.clone(), user.clone());

    tracing::info!(user_id = %user.user_id, has_quiz = user.style_quiz.is_some(), "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    load_user(&state, &user_id).await.map(Json)
}

/// Add (or replace) a closet item
pub async fn add_closet_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(item): Json<ClosetItem>,
) -> AppResult<(StatusCode, Json<ClosetItem>)> {
    require_id(&item.item_id, "item_id")?;
    require_id(&item.category, "category")?;

    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&user_id)
        .ok_or_else(|| user_not_found(&user_id))?;
    user.add_closet_item(item.clone());

    tracing::debug!(user_id = %user_id, item_id = %item.item_id, "Added closet item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Apply a list of field updates to a closet item
pub async fn update_closet_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    Json(updates): Json<Vec<ClosetItemUpdate>>,
) -> AppResult<Json<ClosetItem>> {
    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&user_id)
        .ok_or_else(|| user_not_found(&user_id))?;

    let item = user
        .closet_item_mut(&item_id)
        .ok_or_else(|| AppError::NotFound(format!("Closet item {}", item_id)))?;
    for update in updates {
        item.apply(update);
    }
    let updated = item.clone();
    user.updated_at = Utc::now();

    Ok(Json(updated))
}

/// Remove a closet item
pub async fn remove_closet_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&user_id)
        .ok_or_else(|| user_not_found(&user_id))?;

    user.remove_closet_item(&item_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound(format!("Closet item {}", item_id)))
}

/// Record a like or dislike for a catalog item
pub async fn record_feedback(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<StatusCode> {
    require_id(&item_id, "item_id")?;

    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&user_id)
        .ok_or_else(|| user_not_found(&user_id))?;

    let now = Utc::now();
    user.feedback.record(&item_id, request.liked, now);
    user.updated_at = now;

    tracing::debug!(user_id = %user_id, item_id = %item_id, liked = request.liked, "Recorded feedback");
    Ok(StatusCode::NO_CONTENT)
}

/// Save an outfit; an outfit already saved is ignored
pub async fn save_outfit(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SaveOutfitRequest>,
) -> AppResult<Json<SaveOutfitResponse>> {
    if request.item_ids.is_empty() {
        return Err(AppError::InvalidInput("item_ids must not be empty".to_string()));
    }
    for item_id in &request.item_ids {
        require_id(item_id, "item_id")?;
    }

    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&user_id)
        .ok_or_else(|| user_not_found(&user_id))?;

    let now = Utc::now();
    let saved = user.feedback.save_outfit(request.item_ids, now);
    user.updated_at = now;

    Ok(Json(SaveOutfitResponse {
        saved,
        saved_outfits: user.feedback.saved_outfits.len(),
    }))
}

/// Generate recommendations for a user
pub async fn recommend(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    request: Option<Json<RecommendationRequest>>,
) -> AppResult<Json<RecommendationResponse>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let user = load_user(&state, &user_id).await?;

    let catalog = state.catalog.fetch_catalog().await?;
    let social_proof = request.social_proof.filter(|c| {
        if !c.has_celebrity() {
            tracing::warn!(user_id = %user_id, "Ignoring social proof context without a celebrity");
        }
        c.has_celebrity()
    });

    tracing::debug!(
        user_id = %user_id,
        provider = state.catalog.name(),
        catalog_size = catalog.len(),
        "Generating recommendations"
    );

    let settings = Arc::clone(&state.settings);
    let response = tokio::task::spawn_blocking(move || {
        generate_recommendations(
            &user,
            &catalog,
            request.context,
            social_proof.as_ref(),
            &settings,
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(response))
}

/// Catalog items resembling one item, personalized when a known user is given
pub async fn similar_items(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(query): Query<SimilarItemsQuery>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let profile = match query.user_id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(user_id) => Some(build_style_profile(&load_user(&state, user_id).await?)),
        None => None,
    };

    let catalog = state.catalog.fetch_catalog().await?;
    let reference = catalog
        .iter()
        .find(|item| item.item_id == item_id)
        .ok_or_else(|| AppError::NotFound(format!("Item {}", item_id)))?;

    let similar = find_similar(
        reference,
        &catalog,
        profile.as_ref(),
        query.category.as_deref(),
        query.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
    );

    tracing::debug!(item_id = %item_id, results = similar.len(), "Found similar items");
    Ok(Json(similar.into_iter().cloned().collect()))
}

/// Suggest outfits that complete the given catalog items
pub async fn complete_outfits(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CompleteOutfitRequest>,
) -> AppResult<Json<Vec<OutfitRecommendation>>> {
    if request.item_ids.is_empty() {
        return Err(AppError::InvalidInput("item_ids must not be empty".to_string()));
    }

    let user = load_user(&state, &user_id).await?;
    let catalog = state.catalog.fetch_catalog().await?;

    let mut seeds: Vec<&ClothingItem> = Vec::new();
    for item_id in &request.item_ids {
        match catalog.iter().find(|item| &item.item_id == item_id) {
            Some(item) => seeds.push(item),
            None => tracing::warn!(user_id = %user_id, item_id = %item_id, "Skipping unknown outfit item"),
        }
    }
    if seeds.is_empty() {
        return Err(AppError::NotFound("None of the requested items are in the catalog".to_string()));
    }

    let profile = build_style_profile(&user);
    let outfits = complete_outfit(
        &seeds,
        &catalog,
        &profile,
        request.occasion.as_deref(),
        request.limit.unwrap_or(DEFAULT_COMPLETION_LIMIT),
    );

    tracing::debug!(user_id = %user_id, seeds = seeds.len(), outfits = outfits.len(), "Completed outfits");
    Ok(Json(outfits))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/catalog", get(handlers::get_catalog))
        .route("/catalog/:item_id/similar", get(handlers::similar_items))
        // Users
        .route("/users", post(handlers::create_user))
        .route("/users/:user_id", get(handlers::get_user))
        // Closet
        .route("/users/:user_id/closet", post(handlers::add_closet_item))
        .route(
            "/users/:user_id/closet/:item_id",
            put(handlers::update_closet_item).delete(handlers::remove_closet_item),
        )
        // Feedback
        .route("/users/:user_id/feedback/:item_id", post(handlers::record_feedback))
        .route("/users/:user_id/outfits", post(handlers::save_outfit))
        .route("/users/:user_id/outfits/complete", post(handlers::complete_outfits))
        // Recommendations
        .route("/users/:user_id/recommendations", post(handlers::recommend))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

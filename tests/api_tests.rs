use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use stylist_api::api::{create_router, AppState};
use stylist_api::models::ClothingItem;
use stylist_api::services::{InMemoryCatalog, RecommendationSettings};

fn catalog_item(id: &str, category: &str, color: &str) -> ClothingItem {
    let mut item = ClothingItem::new(id, "acme", category);
    item.colors = vec![color.to_string()];
    item
}

fn create_test_server() -> TestServer {
    let catalog = InMemoryCatalog::new(vec![
        catalog_item("acme_tops_black", "tops", "black"),
        catalog_item("acme_bottoms_blue", "bottoms", "blue"),
        catalog_item("acme_shoes_white", "shoes", "white"),
    ]);
    let state = AppState::with_catalog(Arc::new(catalog), RecommendationSettings::default());
    TestServer::new(create_router(state)).unwrap()
}

async fn create_user(server: &TestServer, user_id: &str) {
    let response = server.post("/users").json(&json!({ "user_id": user_id })).await;
    response.assert_status(StatusCode::CREATED);
}

fn item_ids(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["item_id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_catalog() {
    let server = create_test_server();
    let response = server.get("/catalog").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["item_id"], "acme_tops_black");
}

#[tokio::test]
async fn test_create_user_with_quiz() {
    let server = create_test_server();
    let response = server
        .post("/users")
        .json(&json!({
            "user_id": "u1",
            "style_quiz": {
                "overall_style": ["Minimalist", "not-a-style"],
                "color_palette": ["neutrals"],
                "favorite_brands": ["Acme"]
            }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["style_quiz"]["overall_style"], json!(["minimalist"]));
    assert_eq!(body["style_quiz"]["color_palette"], json!(["neutrals"]));

    let response = server.get("/users/u1").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["style_quiz"]["favorite_brands"], json!(["Acme"]));
}

#[tokio::test]
async fn test_create_user_validation() {
    let server = create_test_server();
    let response = server.post("/users").json(&json!({ "user_id": "  " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("user_id"));

    create_user(&server, "dup").await;
    let response = server.post("/users").json(&json!({ "user_id": "dup" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let server = create_test_server();
    let response = server.get("/users/ghost").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("ghost"));

    let response = server
        .post("/users/ghost/recommendations")
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_closet_lifecycle() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server
        .post("/users/u1/closet")
        .json(&json!({ "item_id": "c1", "category": "tops", "color": "black" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["favorite"], false);

    let response = server
        .put("/users/u1/closet/c1")
        .json(&json!([
            { "field": "favorite", "value": true },
            { "field": "brand", "value": "Acme" },
            { "field": "mark_worn", "value": "2024-05-01T12:00:00Z" }
        ]))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["favorite"], true);
    assert_eq!(body["brand"], "Acme");
    assert_eq!(body["worn_count"], 1);

    let response = server.put("/users/u1/closet/missing").json(&json!([])).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.delete("/users/u1/closet/c1").await;
    response.assert_status(StatusCode::NO_CONTENT);
    let response = server.delete("/users/u1/closet/c1").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_moves_between_sets() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let uri = "/users/u1/feedback/acme_tops_black";
    let response = server.post(uri).json(&json!({ "liked": true })).await;
    response.assert_status(StatusCode::NO_CONTENT);
    let response = server.post(uri).json(&json!({ "liked": false })).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let body: Value = server.get("/users/u1").await.json();
    assert_eq!(body["feedback"]["liked_items"], json!([]));
    assert_eq!(body["feedback"]["disliked_items"], json!(["acme_tops_black"]));
}

#[tokio::test]
async fn test_save_outfit_ignores_duplicates() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let outfit = json!({ "item_ids": ["acme_tops_black", "acme_bottoms_blue"] });
    let response = server.post("/users/u1/outfits").json(&outfit).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "saved": true, "saved_outfits": 1 }));

    let response = server.post("/users/u1/outfits").json(&outfit).await;
    response.assert_json(&json!({ "saved": false, "saved_outfits": 1 }));

    let response = server
        .post("/users/u1/outfits")
        .json(&json!({ "item_ids": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_exclude_closet_and_dislikes() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    server
        .post("/users/u1/closet")
        .json(&json!({ "item_id": "acme_shoes_white", "category": "shoes", "color": "white" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/users/u1/feedback/acme_bottoms_blue")
        .json(&json!({ "liked": false }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .post("/users/u1/recommendations")
        .json(&json!({ "context": "weekend" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["recommendation_context"], "weekend");
    assert_eq!(item_ids(&body["recommended_items"]), vec!["acme_tops_black"]);
}

#[tokio::test]
async fn test_recommendations_without_body() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server.post("/users/u1/recommendations").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommended_items"].as_array().unwrap().len(), 3);
    assert_eq!(body["recommendation_context"], Value::Null);
}

#[tokio::test]
async fn test_recommendations_with_social_proof() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server
        .post("/users/u1/recommendations")
        .json(&json!({
            "social_proof": {
                "celebrity": "Zendaya",
                "event": "Met Gala",
                "colors": ["black"],
                "outfit_tags": ["top"]
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let first = &body["recommended_items"][0];
    assert_eq!(first["item_id"], "acme_tops_black");
    assert_eq!(first["social_proof"]["celebrity"], "Zendaya");
    assert_eq!(first["social_proof"]["event"], "Met Gala");
    assert_eq!(first["match_reasons"][0], "Inspired by Zendaya's style");
}

#[tokio::test]
async fn test_social_proof_without_celebrity_is_ignored() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server
        .post("/users/u1/recommendations")
        .json(&json!({
            "social_proof": {
                "celebrity": "  ",
                "colors": ["black"],
                "outfit_tags": ["top"]
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    for item in body["recommended_items"].as_array().unwrap() {
        assert_eq!(item["social_proof"], Value::Null);
    }
}

#[tokio::test]
async fn test_similar_items() {
    let server = create_test_server();

    let response = server.get("/catalog/acme_tops_black/similar").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        item_ids(&body),
        vec!["acme_bottoms_blue", "acme_shoes_white"]
    );

    let response = server
        .get("/catalog/acme_tops_black/similar")
        .add_query_param("category", "shoes")
        .await;
    let body: Value = response.json();
    assert_eq!(item_ids(&body), vec!["acme_shoes_white"]);

    let response = server
        .get("/catalog/acme_tops_black/similar")
        .add_query_param("limit", 1)
        .await;
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_similar_items_not_found() {
    let server = create_test_server();

    let response = server.get("/catalog/missing/similar").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get("/catalog/acme_tops_black/similar")
        .add_query_param("user_id", "ghost")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_complete_outfit_from_one_item() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server
        .post("/users/u1/outfits/complete")
        .json(&json!({ "item_ids": ["acme_tops_black", "not_in_catalog"] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let outfits = body.as_array().unwrap();
    assert_eq!(outfits.len(), 1);
    assert_eq!(outfits[0]["occasion"], "casual");
    assert_eq!(
        outfits[0]["items"],
        json!(["acme_tops_black", "acme_bottoms_blue", "acme_shoes_white"])
    );
}

#[tokio::test]
async fn test_complete_outfit_validation() {
    let server = create_test_server();
    create_user(&server, "u1").await;

    let response = server
        .post("/users/u1/outfits/complete")
        .json(&json!({ "item_ids": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/users/u1/outfits/complete")
        .json(&json!({ "item_ids": ["not_in_catalog"] }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post("/users/ghost/outfits/complete")
        .json(&json!({ "item_ids": ["acme_tops_black"] }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let server = create_test_server();
    let response = server.get("/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_default_state_has_empty_catalog() {
    let server = TestServer::new(create_router(AppState::new())).unwrap();
    let response = server.get("/catalog").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));

    create_user(&server, "u1").await;
    let response = server.post("/users/u1/recommendations").json(&json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommended_items"], json!([]));
}

//! HTTP-level integration tests for commit and history endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, new_profile, post_json};
use sqlx::PgPool;

async fn create_recipe(pool: &PgPool, user: i64, title: &str, servings: i64) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/recipes",
        user,
        serde_json::json!({
            "title": title,
            "servings": servings,
            "steps": "cook",
            "ingredients": [{"name": "salt"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: commit creates version 2 with the field diff
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_records_changes(pool: PgPool) {
    let user = new_profile(&pool, "cook").await;
    let id = create_recipe(&pool, user, "Tamales", 4).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/recipes/{id}/commit"),
        user,
        serde_json::json!({
            "message": "double batch",
            "content": {
                "title": "Tamales",
                "servings": 6,
                "steps": "cook",
                "ingredients": [{"name": "salt"}]
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["version_number"], 2);
    assert_eq!(json["data"]["commit_message"], "double batch");
    assert_eq!(json["data"]["changes"]["servings"]["from"], 4);
    assert_eq!(json["data"]["changes"]["servings"]["to"], 6);
}

// ---------------------------------------------------------------------------
// Test: unchanged content commits nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_no_changes_is_noop(pool: PgPool) {
    let user = new_profile(&pool, "idle").await;
    let id = create_recipe(&pool, user, "Atole", 2).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/recipes/{id}/commit"),
        user,
        serde_json::json!({
            "message": "nothing",
            "content": {
                "title": "Atole",
                "servings": 2,
                "steps": "cook",
                "ingredients": [{"name": "salt"}]
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].is_null());
}

// ---------------------------------------------------------------------------
// Test: commit message is required
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_requires_message(pool: PgPool) {
    let user = new_profile(&pool, "mute").await;
    let id = create_recipe(&pool, user, "Champurrado", 2).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/recipes/{id}/commit"),
        user,
        serde_json::json!({
            "message": "  ",
            "content": {"title": "Champurrado", "servings": 3}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: only the owner may commit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_commit_requires_ownership(pool: PgPool) {
    let owner = new_profile(&pool, "owner").await;
    let stranger = new_profile(&pool, "stranger").await;
    let id = create_recipe(&pool, owner, "Guacamole", 2).await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/recipes/{id}/commit"),
        stranger,
        serde_json::json!({
            "message": "sneaky",
            "content": {"title": "Guacamole", "servings": 8}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: history is newest first and paginates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_endpoint(pool: PgPool) {
    let user = new_profile(&pool, "chronicler").await;
    let id = create_recipe(&pool, user, "Pipian", 2).await;

    for servings in [3, 4] {
        let app = build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/recipes/{id}/commit"),
            user,
            serde_json::json!({
                "message": format!("servings to {servings}"),
                "content": {
                    "title": "Pipian",
                    "servings": servings,
                    "steps": "cook",
                    "ingredients": [{"name": "salt"}]
                }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/recipes/{id}/history")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let commits = json["data"].as_array().unwrap();
    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0]["version_number"], 3);
    assert_eq!(commits[0]["author_username"], "chronicler");
    assert_eq!(commits[2]["version_number"], 1);

    // Pagination: one entry per page, second page.
    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/recipes/{id}/history?limit=1&offset=1")).await;
    let json = body_json(response).await;
    let commits = json["data"].as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["version_number"], 2);

    // Unknown recipe: 404 per the version-store contract.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/recipes/999999/history").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

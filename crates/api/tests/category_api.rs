//! HTTP-level integration tests for the categories resource.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, send_json};
use sqlx::PgPool;

/// Create a category through the API, returning its id.
async fn create_category(pool: &PgPool, body: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/categories", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_category_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "Signage", "slug": "signage"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Signage");
    assert_eq!(json["data"]["slug"], "signage");
    assert!(json["data"]["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/categories",
        serde_json::json!({"name": "Signage"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_slug_is_derived_from_name(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "Işıklı Kutu Harf"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "isikli-kutu-harf");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_name_returns_400_with_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["name"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_slug_returns_409(pool: PgPool) {
    create_category(&pool, serde_json::json!({"name": "Signage", "slug": "signage"})).await;

    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "Other", "slug": "signage"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn nested_parent_is_rejected(pool: PgPool) {
    let parent = create_category(&pool, serde_json::json!({"name": "Signage"})).await;
    let child = create_category(
        &pool,
        serde_json::json!({"name": "Letters", "parent_id": parent}),
    )
    .await;

    // A child cannot itself be a parent.
    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({"name": "Neon", "parent_id": child}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_all_fields(pool: PgPool) {
    let id = create_category(&pool, serde_json::json!({"name": "Signage"})).await;

    let app = common::build_test_app(pool).await;
    let response = put_json_auth(
        app,
        &format!("/api/v1/categories/{id}"),
        serde_json::json!({"name": "Outdoor Signage", "slug": "outdoor", "display_order": 5}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Outdoor Signage");
    assert_eq!(json["data"]["slug"], "outdoor");
    assert_eq!(json["data"]["display_order"], 5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_category_with_projects_returns_409(pool: PgPool) {
    let id = create_category(&pool, serde_json::json!({"name": "Signage"})).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({"title": "Totem", "category_id": id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, "/api/v1/categories/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tree and related views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tree_groups_children_under_parents(pool: PgPool) {
    let signage =
        create_category(&pool, serde_json::json!({"name": "Signage", "display_order": 0})).await;
    create_category(
        &pool,
        serde_json::json!({"name": "Letters", "parent_id": signage, "display_order": 0}),
    )
    .await;
    create_category(&pool, serde_json::json!({"name": "Printing", "display_order": 1})).await;

    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/v1/categories/tree").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tree = json["data"].as_array().unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0]["name"], "Signage");
    assert_eq!(tree[0]["children"][0]["name"], "Letters");
    assert_eq!(tree[1]["name"], "Printing");
    assert_eq!(tree[1]["children"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn related_lists_siblings_before_padding_with_counts(pool: PgPool) {
    let signage = create_category(
        &pool,
        serde_json::json!({"name": "Signage", "display_order": 0}),
    )
    .await;
    let letters = create_category(
        &pool,
        serde_json::json!({"name": "Letters", "parent_id": signage, "display_order": 0}),
    )
    .await;
    let neon = create_category(
        &pool,
        serde_json::json!({"name": "Neon", "parent_id": signage, "display_order": 1}),
    )
    .await;
    let printing = create_category(
        &pool,
        serde_json::json!({"name": "Printing", "display_order": 1}),
    )
    .await;

    // One active project under Neon.
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({"title": "Neon Totem", "category_id": neon}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool).await;
    let response = get(app, &format!("/api/v1/categories/{letters}/related")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let related = json["data"].as_array().unwrap();

    // Sibling (Neon) first, then padding from other top-level (Printing).
    assert_eq!(related[0]["id"].as_i64().unwrap(), neon);
    assert_eq!(related[0]["project_count"], 1);
    assert_eq!(related[1]["id"].as_i64().unwrap(), printing);
    assert_eq!(related[1]["project_count"], 0);
}

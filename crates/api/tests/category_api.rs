//! HTTP-level integration tests for the category endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_category, create_task, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_category_returns_201_with_zero_count(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/categories",
        json!({"name": "  Work  ", "color": "#3B82F6"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Category created successfully");
    assert_eq!(json["data"]["name"], "Work");
    assert_eq!(json["data"]["color"], "#3B82F6");
    assert_eq!(json["data"]["taskCount"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn name_length_boundary(pool: PgPool) {
    let ok = post_json(
        common::build_test_app(pool.clone()),
        "/api/categories",
        json!({"name": "n".repeat(50)}),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::CREATED);

    let too_long = post_json(
        common::build_test_app(pool),
        "/api/categories",
        json!({"name": "n".repeat(51)}),
    )
    .await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    let json = body_json(too_long).await;
    assert_eq!(json["details"][0]["field"], "name");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn color_must_be_hex(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/categories",
        json!({"name": "Work", "color": "#ZZZZZZ"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "color");
    assert_eq!(
        json["details"][0]["message"],
        "Color must be a valid hex color (e.g., #FF5733)"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_ordered_by_name_with_counts(pool: PgPool) {
    let work = create_category(&pool, "Work").await;
    create_category(&pool, "Health").await;
    create_task(&pool, json!({"title": "Proposal", "categoryId": work})).await;

    let response = get(common::build_test_app(pool), "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["name"], "Health");
    assert_eq!(json["data"][0]["taskCount"], 0);
    assert_eq!(json["data"][1]["name"], "Work");
    assert_eq!(json["data"][1]["taskCount"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_category_by_id(pool: PgPool) {
    let id = create_category(&pool, "Health").await;

    let response = get(common::build_test_app(pool.clone()), &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Health");

    let response = get(common::build_test_app(pool), "/api/categories/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_category_renames_and_keeps_color(pool: PgPool) {
    let id = create_category(&pool, "Work").await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/categories/{id}"),
        json!({"name": "Office"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Category updated successfully");
    assert_eq!(json["data"]["name"], "Office");
    assert_eq!(json["data"]["color"], "#3B82F6");

    let response = put_json(
        common::build_test_app(pool),
        "/api/categories/missing",
        json!({"name": "Office"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_category_validates_every_field(pool: PgPool) {
    let id = create_category(&pool, "Work").await;
    let uri = format!("/api/categories/{id}");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"name": "   ", "color": "#ZZZZZZ"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "color");
    assert_eq!(details[1]["field"], "name");
    assert_eq!(details[1]["message"], "Name is required");

    // The stored category is untouched.
    let json = body_json(get(common::build_test_app(pool), &uri).await).await;
    assert_eq!(json["data"]["name"], "Work");
    assert_eq!(json["data"]["color"], "#3B82F6");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_with_tasks_is_blocked_and_category_survives(pool: PgPool) {
    let id = create_category(&pool, "Work").await;
    create_task(&pool, json!({"title": "Proposal", "categoryId": id})).await;
    create_task(&pool, json!({"title": "Review", "categoryId": id})).await;
    let uri = format!("/api/categories/{id}");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Cannot delete category with 2 associated tasks. Please reassign or delete the tasks first."
    );

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["taskCount"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unused_category(pool: PgPool) {
    let id = create_category(&pool, "Shopping").await;
    let uri = format!("/api/categories/{id}");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Category deleted successfully"
    );

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

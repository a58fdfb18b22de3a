//! Integration tests for the entity CRUD endpoints.
//!
//! Runs the full router over the in-memory store. Every collection shares
//! the same six-operation surface, so products get the detailed treatment
//! and the remaining resources are exercised for shape.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = common::build_test_app();

    let response = post_json(
        app,
        "/products/",
        serde_json::json!({
            "id": 1,
            "name": "Abbey Road",
            "price": "19.99",
            "product_type_id": 1,
            "catalog_id": 1,
            "album_id": 1
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Abbey Road");
    assert_eq!(json["price"], "19.99");
    assert_eq!(json["status"], "A");
    assert!(json["modified_at"].is_string());
}

#[tokio::test]
async fn test_create_duplicate_product_returns_400() {
    let app = common::build_test_app();

    let body = serde_json::json!({
        "id": 1,
        "name": "Abbey Road",
        "price": "19.99",
        "product_type_id": 1,
        "catalog_id": 1,
        "album_id": 1
    });
    let response = post_json(app.clone(), "/products/", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/products/", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_ID");
    assert_eq!(json["error"], "Product with id 1 already exists");
}

#[tokio::test]
async fn test_create_product_ignores_unknown_references() {
    let app = common::build_test_app();

    // References are not validated on write; none of these rows exist.
    let response = post_json(
        app,
        "/products/",
        serde_json::json!({
            "id": 5,
            "name": "Dangling",
            "price": "9.99",
            "product_type_id": 999,
            "catalog_id": 999,
            "album_id": 999
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["catalog_id"], 999);
}

#[tokio::test]
async fn test_list_products_returns_all() {
    let app = common::build_test_app();

    for id in [1, 2] {
        post_json(
            app.clone(),
            "/products/",
            serde_json::json!({
                "id": id,
                "name": format!("Product {id}"),
                "price": "10.00",
                "product_type_id": 1,
                "catalog_id": 1,
                "album_id": 1
            }),
        )
        .await;
    }

    let response = get(app, "/products/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], 1);
    assert_eq!(arr[1]["id"], 2);
}

#[tokio::test]
async fn test_list_empty_products_returns_404() {
    let app = common::build_test_app();

    let response = get(app, "/products/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No Product records exist");
}

#[tokio::test]
async fn test_get_product_by_id() {
    let app = common::build_test_app();

    post_json(
        app.clone(),
        "/products/",
        serde_json::json!({
            "id": 7,
            "name": "Blue Train",
            "price": "14.99",
            "product_type_id": 1,
            "catalog_id": 1,
            "album_id": 1
        }),
    )
    .await;

    let response = get(app, "/products/7").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Blue Train");
}

#[tokio::test]
async fn test_get_nonexistent_product_returns_404() {
    let app = common::build_test_app();

    let response = get(app, "/products/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Product with id 42 not found");
}

#[tokio::test]
async fn test_update_product_returns_200() {
    let app = common::build_test_app();

    post_json(
        app.clone(),
        "/products/",
        serde_json::json!({
            "id": 1,
            "name": "First Pressing",
            "price": "19.99",
            "product_type_id": 1,
            "catalog_id": 1,
            "album_id": 1
        }),
    )
    .await;

    let response = put_json(
        app,
        "/products/1",
        serde_json::json!({
            "name": "Remastered",
            "price": "24.99",
            "product_type_id": 2,
            "catalog_id": 2,
            "album_id": 2
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Remastered");
    assert_eq!(json["price"], "24.99");
    assert_eq!(json["album_id"], 2);
    assert_eq!(json["status"], "A");
}

#[tokio::test]
async fn test_update_nonexistent_product_returns_404() {
    let app = common::build_test_app();

    let response = put_json(
        app,
        "/products/42",
        serde_json::json!({
            "name": "Ghost",
            "price": "0.99",
            "product_type_id": 1,
            "catalog_id": 1,
            "album_id": 1
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Catalogs and product types
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_and_get_catalog() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/catalogs/",
        serde_json::json!({"id": 3, "name": "Jazz Classics"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/catalogs/3").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Jazz Classics");
    assert_eq!(json["status"], "A");
}

#[tokio::test]
async fn test_create_and_list_product_types() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/product-types/",
        serde_json::json!({"id": 1, "name": "Vinyl"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/product-types/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Albums and artists
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_album_under_artist() {
    let app = common::build_test_app();

    post_json(
        app.clone(),
        "/artists/",
        serde_json::json!({"id": 1, "name": "Miles Davis"}),
    )
    .await;

    let response = post_json(
        app.clone(),
        "/albums/",
        serde_json::json!({"id": 1, "name": "Kind of Blue", "artist_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["artist_id"], 1);

    let response = get(app, "/artists/1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_artist_returns_200() {
    let app = common::build_test_app();

    post_json(
        app.clone(),
        "/artists/",
        serde_json::json!({"id": 2, "name": "J. Coltrane"}),
    )
    .await;

    let response = put_json(
        app,
        "/artists/2",
        serde_json::json!({"name": "John Coltrane"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "John Coltrane");
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_and_update_supplier() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/suppliers/",
        serde_json::json!({
            "id": 1,
            "name": "Vinyl Wholesale",
            "address": "742 Evergreen Terrace",
            "phone": "555-0100",
            "email": "orders@example.com"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json(
        app,
        "/suppliers/1",
        serde_json::json!({
            "name": "Vinyl Wholesale Ltd",
            "address": "1 Dockside Way",
            "phone": "555-0101",
            "email": "sales@example.com"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Vinyl Wholesale Ltd");
    assert_eq!(json["email"], "sales@example.com");
}

// ---------------------------------------------------------------------------
// Warehouse resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_building_and_location() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/buildings/",
        serde_json::json!({"id": 1, "name": "Main Warehouse", "address": "12 Dock Road"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/locations/",
        serde_json::json!({"id": 1, "name": "Aisle 4", "building_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["building_id"], 1);
}

#[tokio::test]
async fn test_create_stock_and_inventory() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/stocks/",
        serde_json::json!({"id": 1, "product_id": 1, "quantity": 40}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/inventories/",
        serde_json::json!({
            "id": 1,
            "location_id": 1,
            "product_id": 1,
            "stock_id": 1,
            "quantity": 12
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["quantity"], 12);
    assert_eq!(json["status"], "A");
}

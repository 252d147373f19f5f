//! REST surface integration tests
//!
//! Drives the axum router in-process via tower's `oneshot`: pagination
//! envelope, query-parameter filtering, the read-only deployment gate and
//! the disable action's status codes.

#![cfg(feature = "server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use shop_catalog::api::{create_catalog_router, AppState};
use shop_catalog::{
    CatalogService, MemoryStore, NewArticleFields, NewCategoryFields, NewProductFields,
};

struct Fixture {
    catalog: CatalogService,
    fruits: Uuid,
    pomme: Uuid,
}

async fn seed() -> Fixture {
    let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
    let fruits = catalog
        .create_category(NewCategoryFields {
            name: "Fruits".to_string(),
            description: "Fruits du marché".to_string(),
            active: Some(true),
        })
        .await
        .unwrap()
        .id;
    catalog
        .create_category(NewCategoryFields {
            name: "Légumes".to_string(),
            description: "Légumes du marché".to_string(),
            active: Some(false),
        })
        .await
        .unwrap();
    let pomme = catalog
        .create_product(NewProductFields {
            name: "Pomme".to_string(),
            description: String::new(),
            category_id: fruits,
            ecoscore: None,
            active: Some(true),
        })
        .await
        .unwrap()
        .id;
    catalog
        .create_article(NewArticleFields {
            name: "1kg".to_string(),
            description: String::new(),
            price: "2.50".parse().unwrap(),
            product_id: pomme,
            active: Some(true),
        })
        .await
        .unwrap();
    Fixture {
        catalog,
        fruits,
        pomme,
    }
}

fn router(catalog: CatalogService, read_only: bool) -> axum::Router {
    create_catalog_router(AppState { catalog, read_only })
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn category_list_is_paginated_and_filtered() {
    let fx = seed().await;
    let app = router(fx.catalog, true);

    let (status, body) = get_json(&app, "/api/category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);
    assert_eq!(body["results"][0]["name"], json!("Fruits"));

    let (status, body) = get_json(&app, "/api/category?show_inactive=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));
}

#[tokio::test]
async fn pagination_envelope_links_pages() {
    let catalog = CatalogService::new(Arc::new(MemoryStore::new()));
    for i in 0..5 {
        catalog
            .create_category(NewCategoryFields {
                name: format!("Rayon {i}"),
                description: format!("Rayon {i} du magasin"),
                active: Some(true),
            })
            .await
            .unwrap();
    }
    let app = router(catalog, true);

    let (status, body) = get_json(&app, "/api/category?page=1&page_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(5));
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], json!("?page=2&page_size=2"));
    assert_eq!(body["previous"], Value::Null);

    let (_, body) = get_json(&app, "/api/category?page=3&page_size=2").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], json!("?page=2&page_size=2"));
}

#[tokio::test]
async fn category_detail_embeds_active_products() {
    let fx = seed().await;
    let fruits = fx.fruits;
    let app = router(fx.catalog, true);

    let (status, body) = get_json(&app, &format!("/api/category/{fruits}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Fruits"));
    assert_eq!(body["products"][0]["name"], json!("Pomme"));
    assert_eq!(body["products"][0]["articles"][0]["name"], json!("1kg"));
    assert_eq!(body["products"][0]["articles"][0]["price"], json!("2.50"));
}

#[tokio::test]
async fn article_list_flattens_the_ownership_chain() {
    let fx = seed().await;
    let app = router(fx.catalog, true);

    let (status, body) = get_json(&app, "/api/article").await;
    assert_eq!(status, StatusCode::OK);
    let article = &body["results"][0];
    assert_eq!(article["name"], json!("1kg"));
    assert_eq!(article["price"], json!("2.50"));
    assert_eq!(article["product_name"], json!("Pomme"));
    assert_eq!(article["category_name"], json!("Fruits"));
}

#[tokio::test]
async fn read_only_deployment_rejects_creates() {
    let fx = seed().await;
    let app = router(fx.catalog, true);

    for uri in ["/api/category", "/api/product", "/api/article"] {
        let (status, _) = post_json(&app, uri, json!({"name": "Nouveau"})).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "POST {uri}");
    }

    // Still read-only after the rejection: nothing was created
    let (_, body) = get_json(&app, "/api/category?show_inactive=true").await;
    assert_eq!(body["count"], json!(2));
}

#[tokio::test]
async fn writable_deployment_validates_creates() {
    let fx = seed().await;
    let pomme = fx.pomme;
    let app = router(fx.catalog, false);

    let (status, body) = post_json(
        &app,
        "/api/article",
        json!({"name": "500g", "price": "0.50", "product_id": pomme}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], json!("price"));

    let (status, _) = post_json(
        &app,
        "/api/article",
        json!({"name": "1kg", "price": "3.00", "product_id": pomme}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post_json(
        &app,
        "/api/article",
        json!({"name": "5kg", "price": "9.90", "product_id": pomme}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!("5kg"));
    assert_eq!(body["price"], json!("9.90"));
}

#[tokio::test]
async fn disable_action_returns_no_content_and_404_when_missing() {
    let fx = seed().await;
    let pomme = fx.pomme;
    let fruits = fx.fruits;
    let app = router(fx.catalog, true);

    let (status, _) = post_json(&app, &format!("/api/product/{pomme}/disable"), json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Disabled product no longer shows up in the category detail
    let (_, body) = get_json(&app, &format!("/api/category/{fruits}")).await;
    assert_eq!(body["products"], json!([]));

    // Idempotent
    let (status, _) = post_json(&app, &format!("/api/product/{pomme}/disable"), json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let missing = Uuid::new_v4();
    let (status, _) = post_json(&app, &format!("/api/product/{missing}/disable"), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_lists_skip_the_default_filter() {
    let fx = seed().await;
    let pomme = fx.pomme;
    let app = router(fx.catalog, true);

    let (status, body) = get_json(&app, "/api/admin/category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(2));

    // Disable the only article through the admin surface, then it still lists
    let (_, body) = get_json(&app, "/api/article").await;
    let article_id = body["results"][0]["id"].as_str().unwrap().to_string();
    let (status, _) =
        post_json(&app, &format!("/api/admin/article/{article_id}/disable"), json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get_json(&app, "/api/article").await;
    assert_eq!(body["count"], json!(0));
    let (_, body) = get_json(&app, "/api/admin/article").await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["product_id"], json!(pomme.to_string()));
}

#[tokio::test]
async fn missing_records_map_to_404() {
    let fx = seed().await;
    let app = router(fx.catalog, true);

    let missing = Uuid::new_v4();
    let (status, body) = get_json(&app, &format!("/api/category/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let fx = seed().await;
    let app = router(fx.catalog, true);

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
}

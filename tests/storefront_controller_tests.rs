mod common;

use axum::http::StatusCode;
use common::{body_json, get, product, product_with, review, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

fn names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .expect("product list")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn furnished_app() -> TestApp {
    let app = TestApp::new();
    app.seed_products(&[
        product_with(
            "p1",
            "Oak Dining Table",
            "Dining Tables",
            90000,
            json!({ "color": "Brown", "material": "Oak", "popularity": 5, "isFeatured": true }),
        ),
        product_with(
            "p2",
            "Walnut Bed",
            "Beds",
            150000,
            json!({ "color": "Brown", "material": "Walnut", "popularity": 9, "isNew": true }),
        ),
        product_with(
            "p3",
            "bamboo side table",
            "Side Tables",
            20000,
            json!({ "color": "Natural", "material": "Bamboo", "popularity": 1 }),
        ),
        product_with(
            "p4",
            "Archived Chair",
            "Chairs",
            10000,
            json!({ "status": "Archived" }),
        ),
        product("p5", "Teak Dining Table", "Dining Tables", 70000),
    ]);
    app
}

#[tokio::test]
async fn test_products_are_sorted_by_name_and_hide_archived() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/products", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        names(&body["products"]),
        vec![
            "bamboo side table",
            "Oak Dining Table",
            "Teak Dining Table",
            "Walnut Bed"
        ]
    );
    assert_eq!(body["facets"]["colors"], json!(["Brown", "Natural"]));
    assert_eq!(body["facets"]["materials"], json!(["Oak", "Walnut", "Bamboo"]));
}

#[tokio::test]
async fn test_products_filter_by_price_color_and_sort() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get(
            "/api/v1/products?sort=price-high&maxPrice=100000&colors=Brown,Natural",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        names(&body["products"]),
        vec!["Oak Dining Table", "bamboo side table"]
    );
}

#[tokio::test]
async fn test_unknown_sort_is_rejected() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/products?sort=cheapest", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Unknown sort order: cheapest"));
}

#[tokio::test]
async fn test_category_page_matches_slug() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/products/category/dining-tables?sort=price-low", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["categoryName"], json!("Dining Tables"));
    assert_eq!(
        names(&body["products"]),
        vec!["Teak Dining Table", "Oak Dining Table"]
    );
}

#[tokio::test]
async fn test_category_page_without_products_is_not_found() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/products/category/sofas", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_detail_prefers_same_category() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/product/p1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["product"]["name"], json!("Oak Dining Table"));
    assert_eq!(body["related"][0]["id"], json!("p5"));
    assert!(body["related"].as_array().unwrap().len() <= 4);
    assert!(body["related"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"] != json!("p1")));
}

#[tokio::test]
async fn test_archived_product_detail_is_not_found() {
    let app = furnished_app();

    let response = app
        .router()
        .oneshot(get("/api/v1/product/p4", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Product not found."));
}

#[tokio::test]
async fn test_search_needs_two_characters() {
    let app = furnished_app();
    let router = app.router();

    let short = router
        .clone()
        .oneshot(get("/api/v1/search?q=t", None))
        .await
        .unwrap();
    assert_eq!(body_json(short).await["results"], json!([]));

    let response = router
        .oneshot(get("/api/v1/search?q=TABLE", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        names(&body["results"]),
        vec!["Oak Dining Table", "bamboo side table", "Teak Dining Table"]
    );
}

#[tokio::test]
async fn test_home_collects_content_reviews_and_shelves() {
    let app = furnished_app();
    app.seed_reviews(&[review("r1", "Amna", &[("p1", "Oak Dining Table")])]);

    let response = app
        .router()
        .oneshot(get("/api/v1/home", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["content"]["announcementBar"]["text"], json!(""));
    assert_eq!(body["reviews"][0]["creator"]["name"], json!("Amna"));
    assert_eq!(names(&body["featured"]), vec!["Oak Dining Table"]);
    assert_eq!(names(&body["newArrivals"]), vec!["Walnut Bed"]);
}

#[tokio::test]
async fn test_review_detail_lists_other_reviews() {
    let app = TestApp::new();
    app.seed_reviews(&[
        review("r1", "Amna", &[]),
        review("r2", "Bilal", &[]),
        review("r3", "Sana", &[]),
    ]);

    let response = app
        .router()
        .oneshot(get("/api/v1/review/r2", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["review"]["creator"]["name"], json!("Bilal"));
    let others: Vec<&str> = body["others"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(others, vec!["r1", "r3"]);
}

#[tokio::test]
async fn test_pages_are_cached_until_revalidated() {
    let app = furnished_app();
    let router = app.router();

    let first = body_json(
        router
            .clone()
            .oneshot(get("/api/v1/products", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["products"].as_array().unwrap().len(), 4);

    // Written behind the server's back: the cached page still wins.
    app.seed_products(&[product("p9", "Lone Stool", "Stools", 5000)]);
    let cached = body_json(
        router
            .clone()
            .oneshot(get("/api/v1/products", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cached, first);

    app.state.cache.revalidate("/products");
    let fresh = body_json(
        router
            .oneshot(get("/api/v1/products", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(names(&fresh["products"]), vec!["Lone Stool"]);
}

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, multipart_request, product, review, Part, TestApp};
use serde_json::json;
use tower::ServiceExt;

const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg";

#[tokio::test]
async fn test_admin_products_need_a_session() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(get("/api/v1/admin/products", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Missing admin session token."));
}

#[tokio::test]
async fn test_admin_products_reject_a_forged_token() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(get("/api/v1/admin/products", Some("not-a-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Invalid admin session token."));
}

#[tokio::test]
async fn test_admin_products_are_sorted_by_popularity() {
    let app = TestApp::new();
    let token = app.admin_token();
    let mut quiet = product("p1", "Quiet Lamp", "Lighting", 3000);
    quiet.popularity = 1;
    let mut loud = product("p2", "Loud Sofa", "Sofas", 80000);
    loud.popularity = 7;
    app.seed_products(&[quiet, loud]);

    let response = app
        .router()
        .oneshot(get("/api/v1/admin/products", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["id"], json!("p2"));
    assert_eq!(body[1]["id"], json!("p1"));
}

#[tokio::test]
async fn test_create_product_uploads_images_and_creates_category() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/products",
            &token,
            &[
                Part::Text("name", "Linen Armchair"),
                Part::Text("price", "45000"),
                Part::Text("category", "Arm Chairs"),
                Part::Text("specifications", "Width: 80cm\nnot a spec\nDepth: 75cm"),
                Part::Text("colors", "Beige, Grey"),
                Part::Text("isFeatured", "true"),
                Part::File("mainImage", "front.jpg", "image/jpeg", JPEG),
                Part::File("galleryImages", "side.jpg", "image/jpeg", JPEG),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));

    let saved = &body["product"];
    assert_eq!(saved["name"], json!("Linen Armchair"));
    assert_eq!(saved["category"], json!("Arm Chairs"));
    assert_eq!(saved["isFeatured"], json!(true));
    assert_eq!(saved["options"]["colors"], json!(["Beige", "Grey"]));
    assert_eq!(
        saved["specifications"],
        json!({ "Depth": "75cm", "Width": "80cm" })
    );

    let images = saved["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    for url in images {
        let url = url.as_str().unwrap();
        assert!(url.starts_with("/uploads/product-images/products/"));
        let stored = app.path(&format!("public{}", url));
        assert_eq!(std::fs::read(stored).unwrap(), JPEG);
    }

    let categories: serde_json::Value = serde_json::from_slice(
        &std::fs::read(app.path("data/categories.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(categories[0]["name"], json!("Arm Chairs"));
}

#[tokio::test]
async fn test_create_product_without_price_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/products",
            &token,
            &[Part::Text("name", "Mystery Box")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Price is required."));
}

#[tokio::test]
async fn test_create_product_with_unknown_category_id_is_rejected() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/products",
            &token,
            &[
                Part::Text("name", "Stool"),
                Part::Text("price", "100"),
                Part::Text("category_id", "missing"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Category not found."));
}

#[tokio::test]
async fn test_update_product_keeps_listed_images_and_appends_uploads() {
    let app = TestApp::new();
    let token = app.admin_token();
    let mut existing = product("p1", "Old Name", "Tables", 1000);
    existing.images = vec![
        "https://cdn.test/keep.jpg".to_string(),
        "https://cdn.test/drop.jpg".to_string(),
    ];
    app.seed_products(&[existing]);

    let response = app
        .router()
        .oneshot(multipart_request(
            "PUT",
            "/api/v1/admin/products/p1",
            &token,
            &[
                Part::Text("name", "New Name"),
                Part::Text("price", "1500"),
                Part::Text("existingImages", "https://cdn.test/keep.jpg"),
                Part::File("newImages", "extra.jpg", "image/jpeg", JPEG),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let saved = &body["product"];
    assert_eq!(saved["name"], json!("New Name"));

    let images = saved["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0], json!("https://cdn.test/keep.jpg"));
    assert!(images[1]
        .as_str()
        .unwrap()
        .starts_with("/uploads/product-images/products/"));
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .router()
        .oneshot(multipart_request(
            "PUT",
            "/api/v1/admin/products/nope",
            &token,
            &[Part::Text("name", "Ghost"), Part::Text("price", "1")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_removes_it_and_its_images() {
    let app = TestApp::new();
    let token = app.admin_token();
    let router = app.router();

    let created = body_json(
        router
            .clone()
            .oneshot(multipart_request(
                "POST",
                "/api/v1/admin/products",
                &token,
                &[
                    Part::Text("name", "Short Lived"),
                    Part::Text("price", "10"),
                    Part::File("mainImage", "a.jpg", "image/jpeg", JPEG),
                ],
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["product"]["id"].as_str().unwrap().to_string();
    let image = created["product"]["images"][0].as_str().unwrap().to_string();
    let stored = app.path(&format!("public{}", image));
    assert!(stored.exists());

    let response = router
        .clone()
        .oneshot(delete(&format!("/api/v1/admin/products/{}", id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Product deleted successfully."));
    assert!(!stored.exists());

    let again = router
        .oneshot(delete(&format!("/api/v1/admin/products/{}", id), &token))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_product_shows_up_on_cached_listing() {
    let app = TestApp::new();
    let token = app.admin_token();
    let router = app.router();
    app.seed_products(&[product("p1", "Existing Desk", "Desks", 20000)]);

    let before = body_json(
        router
            .clone()
            .oneshot(get("/api/v1/products", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(before["products"].as_array().unwrap().len(), 1);

    router
        .clone()
        .oneshot(multipart_request(
            "POST",
            "/api/v1/admin/products",
            &token,
            &[Part::Text("name", "Fresh Desk"), Part::Text("price", "25000")],
        ))
        .await
        .unwrap();

    let after = body_json(
        router
            .oneshot(get("/api/v1/products", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(after["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_renamed_product_refreshes_related_and_review_pages() {
    let app = TestApp::new();
    let token = app.admin_token();
    let router = app.router();
    app.seed_products(&[
        product("p1", "Old Name", "Desks", 20000),
        product("p2", "Standing Desk", "Desks", 30000),
    ]);
    app.seed_reviews(&[review("r1", "Amna", &[("p1", "Old Name")])]);

    for uri in ["/api/v1/product/p2", "/api/v1/reviews", "/api/v1/review/r1"] {
        router.clone().oneshot(get(uri, None)).await.unwrap();
    }
    assert_eq!(app.state.cache.len(), 3);

    let response = router
        .clone()
        .oneshot(multipart_request(
            "PUT",
            "/api/v1/admin/products/p1",
            &token,
            &[Part::Text("name", "New Name"), Part::Text("price", "20000")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(
        router
            .clone()
            .oneshot(get("/api/v1/product/p2", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(detail["related"][0]["name"], json!("New Name"));

    let reviews = body_json(
        router
            .clone()
            .oneshot(get("/api/v1/reviews", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(reviews[0]["relatedProducts"][0]["name"], json!("New Name"));

    let review = body_json(router.oneshot(get("/api/v1/review/r1", None)).await.unwrap()).await;
    assert_eq!(review["review"]["relatedProducts"][0]["name"], json!("New Name"));
}

mod common;

use axum::http::StatusCode;
use bigdecimal::BigDecimal;
use common::{body_json, get, write_json, TestApp};
use demporium_server_lib::api::form::FormPayload;
use demporium_server_lib::api::request::ProductForm;
use demporium_server_lib::data::catalog::Catalog;
use demporium_server_lib::services::product_service::ProductService;
use demporium_server_lib::session::cart::CartStore;
use demporium_server_lib::session::storage::FileSnapshots;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

fn seed_fractional_prices(app: &TestApp) {
    write_json(
        &app.path("data/products.json"),
        &json!([
            { "id": "p1", "name": "Rattan Armchair", "category": "Chairs", "price": 29999.99 },
            { "id": "p2", "name": "Cork Coaster", "category": "Decor", "price": 0.1 }
        ]),
    );
}

fn decimal(raw: &str) -> BigDecimal {
    BigDecimal::from_str(raw).unwrap()
}

#[tokio::test]
async fn test_fixture_prices_load_exactly() {
    let app = TestApp::new();
    seed_fractional_prices(&app);

    let products = Catalog::local(app.path("data")).products().await.unwrap();

    assert_eq!(products[0].price, decimal("29999.99"));
    assert_eq!(products[1].price, decimal("0.1"));
}

#[tokio::test]
async fn test_max_price_filter_keeps_product_at_the_bound() {
    let app = TestApp::new();
    seed_fractional_prices(&app);

    let response = app
        .router()
        .oneshot(get("/api/v1/products?maxPrice=29999.99&sort=price-high", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["price"].to_string(), "29999.99");
    assert_eq!(products[1]["price"].to_string(), "0.1");
    assert_eq!(body["facets"]["maxPrice"].to_string(), "29999.99");
}

#[tokio::test]
async fn test_rewriting_fixtures_keeps_numeric_prices() {
    let app = TestApp::new();
    seed_fractional_prices(&app);

    ProductService::new(&app.state)
        .update_product(
            "p2",
            ProductForm::from_payload(
                &FormPayload::new()
                    .text("name", "Cork Coaster")
                    .text("price", "0.25"),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let raw = std::fs::read_to_string(app.path("data/products.json")).unwrap();
    let saved: Value = serde_json::from_str(&raw).unwrap();
    assert!(saved[0]["price"].is_number());
    assert_eq!(saved[0]["price"].to_string(), "29999.99");
    assert_eq!(saved[1]["price"].to_string(), "0.25");
}

#[tokio::test]
async fn test_cart_totals_stay_exact_across_reloads() {
    let app = TestApp::new();
    seed_fractional_prices(&app);
    let coaster = Catalog::local(app.path("data"))
        .product("p2")
        .await
        .unwrap()
        .unwrap();
    let snapshots = app.path("session");

    {
        let mut cart = CartStore::load(FileSnapshots::new(&snapshots));
        cart.add(&coaster, 3);
        assert_eq!(cart.total(), decimal("0.3"));
    }

    let cart = CartStore::load(FileSnapshots::new(&snapshots));
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.items()[0].product.price, decimal("0.1"));
    assert_eq!(cart.total(), decimal("0.3"));
}

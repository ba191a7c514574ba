use crate::api::controllers::{content_controller, order_controller, storefront_controller};
use crate::api::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(storefront_controller::home))
        .route("/products", get(storefront_controller::list_products))
        .route("/products/category/{slug}", get(storefront_controller::category_page))
        .route("/product/{id}", get(storefront_controller::product_detail))
        .route("/search", get(storefront_controller::search))
        .route("/reviews", get(storefront_controller::list_reviews))
        .route("/review/{id}", get(storefront_controller::review_detail))
        .route("/categories", get(storefront_controller::list_categories))
        .route("/brands", get(storefront_controller::list_brands))
        .route("/content", get(content_controller::get_content))
        .route("/site-settings", get(content_controller::get_site_settings))
        .route("/checkout", post(order_controller::place_order))
}

use crate::api::controllers::{
    brand_controller, category_controller, content_controller, media_controller,
    product_controller, review_controller,
};
use crate::api::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;

/// Back-office routes. Every handler takes `AdminClaims`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/reviews", review_routes())
        .nest("/categories", category_routes())
        .nest("/brands", brand_routes())
        .nest("/media", media_routes())
        .route("/content", put(content_controller::update_content))
        .route("/site-settings", put(content_controller::save_site_settings))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(product_controller::get_all_products))
        .route("/", post(product_controller::create_product))
        .route("/{id}", get(product_controller::get_product_by_id))
        .route("/{id}", put(product_controller::update_product))
        .route("/{id}", delete(product_controller::delete_product))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(review_controller::get_all_reviews))
        .route("/", post(review_controller::create_review))
        .route("/upload-url", post(review_controller::create_upload_url))
        .route("/record", post(review_controller::create_review_record))
        .route("/{id}", get(review_controller::get_review_by_id))
        .route("/{id}", put(review_controller::update_review))
        .route("/{id}", delete(review_controller::delete_review))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(category_controller::get_categories))
        .route("/", post(category_controller::save_category))
        .route("/{id}", get(category_controller::get_category))
        .route("/{id}", delete(category_controller::delete_category))
}

fn brand_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(brand_controller::get_brands))
        .route("/", post(brand_controller::save_brand))
        .route("/{id}", get(brand_controller::get_brand))
        .route("/{id}", delete(brand_controller::delete_brand))
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(media_controller::list_images))
        .route("/", post(media_controller::upload_image))
        .route("/{name}", delete(media_controller::delete_image))
}

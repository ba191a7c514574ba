pub mod auth_controller;
pub mod brand_controller;
pub mod category_controller;
pub mod content_controller;
pub mod media_controller;
pub mod order_controller;
pub mod product_controller;
pub mod review_controller;
pub mod storefront_controller;

pub mod auth_service;
pub mod brand_service;
pub mod category_service;
pub mod content_service;
pub mod errors;
pub mod media_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod storefront_service;

pub mod admin_routes;
pub mod auth_routes;
pub mod storefront_routes;

pub mod brand_repo;
pub mod category_repo;
pub mod product_repo;
pub mod review_repo;

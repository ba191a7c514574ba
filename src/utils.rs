pub mod mappers;
pub mod page_cache;

pub mod api;
pub mod browse;
pub mod data;
pub mod security;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;

pub mod catalog;
pub mod content;
pub mod database;
pub mod errors;
pub mod fixtures;
pub mod models;
pub mod repos;

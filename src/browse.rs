pub mod debounce;
pub mod filter;
pub mod search;

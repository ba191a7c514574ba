pub mod cart;
pub mod checkout;
pub mod notification;
pub mod storage;
pub mod wishlist;

pub mod cart;
pub mod category;
pub mod order;
pub mod password_reset;
pub mod product;
pub mod user;

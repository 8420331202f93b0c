pub mod auth;
pub mod image;
pub mod order;
pub mod product;

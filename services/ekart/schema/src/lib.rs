//! sea-orm entities for the eKart database.

pub mod order_items;
pub mod orders;
pub mod products;
pub mod users;

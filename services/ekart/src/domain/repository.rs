#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    Order, OrderDetail, OrderItem, Product, ProductPatch, RemoveOutcome, User,
};
use crate::error::ApiError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for catalog products.
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError>;
    async fn create(&self, product: &Product) -> Result<(), ApiError>;

    /// Apply a partial update and return the updated record.
    async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Product, ApiError>;

    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Repository for orders and their lines.
pub trait OrderRepository: Send + Sync {
    /// Insert the order row, then its item rows. Callers validate the items
    /// beforehand; the two inserts are not wrapped in one transaction.
    async fn create_with_items(&self, order: &Order, items: &[OrderItem])
    -> Result<(), ApiError>;

    /// All orders of one user, newest first, with nested items and product
    /// details resolved via explicit follow-up queries.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderDetail>, ApiError>;

    /// Find an order only if it belongs to `user_id`.
    async fn find_for_user(&self, order_id: Uuid, user_id: Uuid)
    -> Result<Option<Order>, ApiError>;

    /// Delete the item rows, then the order row.
    async fn delete_with_items(&self, order_id: Uuid) -> Result<(), ApiError>;
}

/// Port for stored image files.
pub trait ImageStore: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), ApiError>;

    /// Remove a stored file, distinguishing "already absent" (ignorable)
    /// from an actual failure (loggable, non-fatal for callers).
    async fn remove(&self, filename: &str) -> Result<RemoveOutcome, ApiError>;
}

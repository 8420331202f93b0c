use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Largest accepted image payload: 5 MB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image file extensions (lowercase, without the dot).
pub const ALLOWED_IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Order status assigned at placement time.
pub const ORDER_STATUS_PENDING: &str = "pending";

/// Registered user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial product update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

/// A placed order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// One order line. `price` is a snapshot taken at placement time.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

/// An order with its lines and, where the product still exists, the
/// current product record for each line.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

#[derive(Debug, Clone)]
pub struct OrderItemDetail {
    pub item: OrderItem,
    pub product: Option<Product>,
}

/// Outcome of removing a stored file. "Absent" is a normal result of
/// best-effort cleanup, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Absent,
}

/// Extract the lowercase extension of an uploaded filename if it is on the
/// image allow-list.
pub fn image_ext(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if ALLOWED_IMAGE_EXTS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

/// If `image_url` points at a file under the managed `/uploads/` prefix,
/// return its bare filename. Foreign URLs and nested paths return `None`
/// and are never touched on disk.
pub fn managed_file_name(image_url: &str) -> Option<&str> {
    let (_, rest) = image_url.split_once("/uploads/")?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(rest)
}

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::domain::repository::{ImageStore, ProductRepository};
use crate::domain::types::{Product, ProductPatch, managed_file_name};
use crate::error::ApiError;

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Product>, ApiError> {
        self.repo.list().await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(&self, input: CreateProductInput) -> Result<Product, ApiError> {
        let (Some(name), Some(price), Some(stock)) = (input.name, input.price, input.stock) else {
            return Err(ApiError::MissingData);
        };
        if name.is_empty() {
            return Err(ApiError::MissingData);
        }
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name,
            description: input.description,
            price,
            stock,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&product).await?;
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(&self, id: Uuid, patch: ProductPatch) -> Result<Product, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProductNotFound(id))?;
        self.repo.update(id, &patch).await
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository, S: ImageStore> {
    pub repo: R,
    pub images: S,
}

impl<R: ProductRepository, S: ImageStore> DeleteProductUseCase<R, S> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        let product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProductNotFound(id))?;

        // Best-effort file cleanup: an absent file is fine, a failed removal
        // is logged and must not block deleting the record.
        if let Some(filename) = product.image_url.as_deref().and_then(managed_file_name) {
            if let Err(e) = self.images.remove(filename).await {
                warn!(error = %e, filename, "failed to remove product image");
            }
        }

        self.repo.delete(id).await
    }
}

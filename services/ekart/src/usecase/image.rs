use rand::RngExt;
use tracing::warn;
use uuid::Uuid;

use crate::domain::repository::{ImageStore, ProductRepository};
use crate::domain::types::{MAX_IMAGE_BYTES, ProductPatch, image_ext, managed_file_name};
use crate::error::ApiError;

/// A multipart "image" field as received from the client.
pub struct UploadedImage {
    /// Original client-side filename, used only for its extension.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Generated stored filename: unix millis plus a random hex suffix, so
/// concurrent uploads never clash.
pub fn unique_filename(ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random();
    format!("{millis}-{suffix:08x}.{ext}")
}

fn validated_ext(upload: &UploadedImage) -> Result<String, ApiError> {
    let ext = image_ext(&upload.filename).ok_or(ApiError::UnsupportedImageType)?;
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::ImageTooLarge);
    }
    Ok(ext)
}

// ── StoreImage ───────────────────────────────────────────────────────────────

pub struct StoreImageUseCase<S: ImageStore> {
    pub images: S,
}

impl<S: ImageStore> StoreImageUseCase<S> {
    /// Validate and persist an upload, returning the stored filename.
    pub async fn execute(&self, upload: UploadedImage) -> Result<String, ApiError> {
        let ext = validated_ext(&upload)?;
        let filename = unique_filename(&ext);
        self.images.save(&filename, &upload.bytes).await?;
        Ok(filename)
    }
}

// ── AttachProductImage ───────────────────────────────────────────────────────

pub struct AttachProductImageUseCase<P: ProductRepository, S: ImageStore> {
    pub products: P,
    pub images: S,
    pub public_base_url: String,
}

impl<P: ProductRepository, S: ImageStore> AttachProductImageUseCase<P, S> {
    /// Store the new file, best-effort-remove the product's prior managed
    /// file, and point `image_url` at the new one. Returns the new URL.
    pub async fn execute(
        &self,
        product_id: Uuid,
        upload: UploadedImage,
    ) -> Result<String, ApiError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(ApiError::ProductNotFound(product_id))?;

        let ext = validated_ext(&upload)?;
        let filename = unique_filename(&ext);
        self.images.save(&filename, &upload.bytes).await?;

        if let Some(old) = product.image_url.as_deref().and_then(managed_file_name) {
            if let Err(e) = self.images.remove(old).await {
                warn!(error = %e, filename = old, "failed to remove replaced product image");
            }
        }

        let image_url = format!("{}/uploads/{}", self.public_base_url, filename);
        self.products
            .update(
                product_id,
                &ProductPatch {
                    image_url: Some(image_url.clone()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(image_url)
    }
}

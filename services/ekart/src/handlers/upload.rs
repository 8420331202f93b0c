use anyhow::Context as _;
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::image::{
    AttachProductImageUseCase, StoreImageUseCase, UploadedImage,
};

/// Pull the single "image" field out of a multipart body. A request without
/// that field (or without a filename) is a client error, not an upload.
async fn read_image_field(mut multipart: Multipart) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .context("read multipart field")?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().ok_or(ApiError::NoFile)?.to_owned();
        let bytes = field.bytes().await.context("read multipart body")?;
        return Ok(UploadedImage {
            filename,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::NoFile)
}

// ── POST /upload ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_image_field(multipart).await?;
    let usecase = StoreImageUseCase {
        images: state.image_store(),
    };
    let filename = usecase.execute(upload).await?;
    Ok(Json(UploadResponse {
        url: state.image_url(&filename),
    }))
}

// ── POST /products/{id}/upload-image ─────────────────────────────────────────

#[derive(Serialize)]
pub struct ProductImageResponse {
    pub message: &'static str,
    pub image_url: String,
}

pub async fn upload_product_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ProductImageResponse>, ApiError> {
    let upload = read_image_field(multipart).await?;
    let usecase = AttachProductImageUseCase {
        products: state.product_repo(),
        images: state.image_store(),
        public_base_url: state.public_base_url.clone(),
    };
    let image_url = usecase.execute(id, upload).await?;
    Ok(Json(ProductImageResponse {
        message: "Image uploaded",
        image_url,
    }))
}

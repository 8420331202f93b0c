use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::domain::types::MAX_IMAGE_BYTES;
use crate::handlers::{
    auth::{login, me, signup},
    order::{cancel_order, list_orders, place_order},
    product::{create_product, delete_product, list_products, update_product},
    upload::{upload_image, upload_product_image},
};
use crate::middleware::{propagate_request_id_layer, request_id_layer};
use crate::state::AppState;

async fn root() -> &'static str {
    "eKart Backend is Running"
}

/// Liveness check for `GET /healthz`.
async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness check for `GET /readyz`.
async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        // Catalog
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
        // Images
        .route("/upload", post(upload_image))
        .route("/products/{id}/upload-image", post(upload_product_image))
        // Orders
        .route("/orders", post(place_order))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", delete(cancel_order))
        // Stored images
        .nest_service("/uploads", ServeDir::new(state.upload_dir.clone()))
        // Body limit sits above the 5 MB image cap so oversize-but-bounded
        // uploads surface as validation 400s rather than transport 413s.
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024))
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}

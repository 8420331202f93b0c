use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// eKart service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("user not found")]
    UserNotFound,
    #[error("product {0} not found")]
    ProductNotFound(Uuid),
    #[error("order not found")]
    OrderNotFound,
    #[error("missing data")]
    MissingData,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("no file uploaded")]
    NoFile,
    #[error("unsupported image type")]
    UnsupportedImageType,
    #[error("image too large")]
    ImageTooLarge,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "NO_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::NoFile => "NO_FILE",
            Self::UnsupportedImageType => "UNSUPPORTED_IMAGE_TYPE",
            Self::ImageTooLarge => "IMAGE_TOO_LARGE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials
            | Self::MissingData
            | Self::InvalidQuantity
            | Self::NoFile
            | Self::UnsupportedImageType
            | Self::ImageTooLarge => StatusCode::BAD_REQUEST,
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::ProductNotFound(_) | Self::OrderNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

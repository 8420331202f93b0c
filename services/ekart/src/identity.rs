//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::token::validate_token;

/// Caller identity proven by a `Authorization: Bearer <jwt>` header.
///
/// Rejects with 401 `NO_TOKEN` when the header is absent or not a bearer
/// scheme, and 401 `INVALID_TOKEN` when signature or expiry checks fail.
/// Every request is authenticated independently; no session state is kept.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.to_owned());
        let secret = state.jwt_secret.clone();

        async move {
            let token = bearer.ok_or(ApiError::MissingToken)?;
            let info = validate_token(&token, &secret).map_err(|_| ApiError::InvalidToken)?;
            Ok(Self {
                user_id: info.user_id,
                email: info.email,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use http::Request;

    use crate::token::issue_token;

    const TEST_SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        AppState {
            db: sea_orm::DatabaseConnection::default(),
            jwt_secret: TEST_SECRET.to_owned(),
            upload_dir: "uploads".into(),
            public_base_url: "http://localhost:3000".to_owned(),
        }
    }

    async fn extract_identity(authorization: Option<&str>) -> Result<Identity, ApiError> {
        let mut builder = Request::builder().method("GET").uri("/test");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        Identity::from_request_parts(&mut parts, &test_state()).await
    }

    #[tokio::test]
    async fn should_extract_identity_from_valid_bearer_token() {
        let user_id = Uuid::now_v7();
        let token = issue_token(user_id, "alice@example.com", TEST_SECRET).unwrap();

        let identity = extract_identity(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "alice@example.com");
    }

    #[tokio::test]
    async fn should_reject_missing_header() {
        let err = extract_identity(None).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn should_reject_non_bearer_scheme() {
        let err = extract_identity(Some("Basic abc")).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn should_reject_token_signed_with_other_secret() {
        let token = issue_token(Uuid::now_v7(), "a@b.c", "other-secret").unwrap();
        let err = extract_identity(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn should_reject_garbage_token() {
        let err = extract_identity(Some("Bearer not-a-jwt")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }
}

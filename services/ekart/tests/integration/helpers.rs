use std::path::PathBuf;

use axum_test::TestServer;
use uuid::Uuid;

use ekart::router::build_router;
use ekart::state::AppState;
use ekart::token::issue_token;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-http-tests-only";

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Spin up the full router against a disconnected database. Good for every
/// path that resolves before the first query: routing, auth extraction,
/// request validation, and the filesystem-only upload flow.
pub fn test_server(upload_dir: PathBuf) -> TestServer {
    let state = AppState {
        db: sea_orm::DatabaseConnection::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        upload_dir,
        public_base_url: TEST_BASE_URL.to_owned(),
    };
    TestServer::new(build_router(state)).expect("failed to start test server")
}

pub fn bearer_for(user_id: Uuid) -> String {
    issue_token(user_id, "user@example.com", TEST_JWT_SECRET).expect("failed to issue test token")
}

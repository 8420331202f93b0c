/// eKart service configuration loaded from environment variables.
#[derive(Debug)]
pub struct EkartConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `EKART_PORT`.
    pub port: u16,
    /// Directory where uploaded images are stored (default "uploads").
    pub upload_dir: String,
    /// Base URL used to build absolute image URLs returned to clients
    /// (default "http://localhost:3000"). Env var: `PUBLIC_BASE_URL`.
    pub public_base_url: String,
}

impl EkartConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            port: std::env::var("EKART_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_owned()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_owned()),
        }
    }
}

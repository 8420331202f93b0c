use sea_orm::Database;
use tracing::info;

use ekart::config::EkartConfig;
use ekart::router::build_router;
use ekart::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = EkartConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("failed to create upload directory");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        upload_dir: config.upload_dir.into(),
        public_base_url: config.public_base_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("ekart service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOrderRepository, DbProductRepository, DbUserRepository};
use crate::infra::files::FsImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> FsImageStore {
        FsImageStore {
            root: self.upload_dir.clone(),
        }
    }

    /// Absolute URL under which an uploaded file is served.
    pub fn image_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, filename)
    }
}

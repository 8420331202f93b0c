use std::path::PathBuf;

use anyhow::Context as _;

use crate::domain::repository::ImageStore;
use crate::domain::types::RemoveOutcome;
use crate::error::ApiError;

/// Image store backed by a local directory, served statically under
/// `/uploads`.
#[derive(Clone)]
pub struct FsImageStore {
    pub root: PathBuf,
}

impl ImageStore for FsImageStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create upload directory")?;
        tokio::fs::write(self.root.join(filename), bytes)
            .await
            .context("write image file")?;
        Ok(())
    }

    async fn remove(&self, filename: &str) -> Result<RemoveOutcome, ApiError> {
        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(RemoveOutcome::Removed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RemoveOutcome::Absent),
            Err(e) => Err(anyhow::Error::new(e).context("remove image file").into()),
        }
    }
}

//! Local filesystem content store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use ncloud_core::error::{AppError, ErrorKind};
use ncloud_core::result::AppResult;
use ncloud_core::traits::content::ContentStore;

/// Content store keeping every directory's files under a single
/// top-level folder named by the directory id.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    /// Root directory for all stored content.
    root: PathBuf,
}

impl LocalContentStore {
    /// Create a new content store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn dir_path(&self, directory_id: Uuid) -> PathBuf {
        self.root.join(directory_id.to_string())
    }

    fn file_path(&self, directory_id: Uuid, file_id: Uuid) -> PathBuf {
        self.dir_path(directory_id).join(file_id.to_string())
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn create_dir(&self, directory_id: Uuid) -> AppResult<()> {
        let path = self.dir_path(directory_id);
        fs::create_dir_all(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory folder {directory_id}"),
                e,
            )
        })?;
        debug!(%directory_id, "Created directory folder");
        Ok(())
    }

    async fn remove_dir(&self, directory_id: Uuid) -> AppResult<()> {
        let path = self.dir_path(directory_id);
        if path.exists() {
            fs::remove_dir_all(&path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove directory folder {directory_id}"),
                    e,
                )
            })?;
            debug!(%directory_id, "Removed directory folder");
        }
        Ok(())
    }

    async fn remove_file(&self, directory_id: Uuid, file_id: Uuid) -> AppResult<()> {
        let path = self.file_path(directory_id, file_id);
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to remove file {file_id}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn rename_file(&self, from_dir: Uuid, to_dir: Uuid, file_id: Uuid) -> AppResult<()> {
        let from = self.file_path(from_dir, file_id);
        let to = self.file_path(to_dir, file_id);
        self.create_dir(to_dir).await?;

        fs::rename(&from, &to).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move file {file_id}: {from_dir} -> {to_dir}"),
                e,
            )
        })?;
        debug!(%file_id, %from_dir, %to_dir, "Moved file content");
        Ok(())
    }

    async fn copy_file(
        &self,
        from_dir: Uuid,
        from_file: Uuid,
        to_dir: Uuid,
        to_file: Uuid,
    ) -> AppResult<()> {
        let from = self.file_path(from_dir, from_file);
        let to = self.file_path(to_dir, to_file);
        self.create_dir(to_dir).await?;

        fs::copy(&from, &to).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to copy file {from_file} -> {to_file}"),
                e,
            )
        })?;
        debug!(%from_file, %to_file, "Copied file content");
        Ok(())
    }

    async fn exists_dir(&self, directory_id: Uuid) -> AppResult<bool> {
        let path = self.dir_path(directory_id);
        Ok(path.is_dir())
    }
}

//! Content store trait for the on-disk namespace tree.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Trait for the physical content store.
///
/// The layout is directory-addressed: every directory owns one top-level
/// folder named after its id, and a file lives inside its parent's folder
/// under its own file id. Raw byte upload/download streaming is out of
/// scope; the mutation coordinator only relocates, duplicates, and
/// removes existing content.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create the folder for a directory id.
    async fn create_dir(&self, directory_id: Uuid) -> AppResult<()>;

    /// Recursively remove a directory's folder and everything in it.
    async fn remove_dir(&self, directory_id: Uuid) -> AppResult<()>;

    /// Remove a single file from its parent's folder.
    async fn remove_file(&self, directory_id: Uuid, file_id: Uuid) -> AppResult<()>;

    /// Move a file between two directory folders.
    async fn rename_file(&self, from_dir: Uuid, to_dir: Uuid, file_id: Uuid) -> AppResult<()>;

    /// Duplicate a file into another directory folder under a new id.
    async fn copy_file(
        &self,
        from_dir: Uuid,
        from_file: Uuid,
        to_dir: Uuid,
        to_file: Uuid,
    ) -> AppResult<()>;

    /// Check whether a directory folder exists.
    async fn exists_dir(&self, directory_id: Uuid) -> AppResult<bool>;
}

//! Metadata store traits.
//!
//! Implemented by the sqlx repositories in `ncloud-database`; the
//! service layer depends only on these traits so its orchestration can
//! be tested against in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use ncloud_core::result::AppResult;

use crate::directory::{Directory, NewDirectory};
use crate::file::{File, NewFile};

/// Store operations over directory records.
#[async_trait]
pub trait DirectoryStore: Send + Sync + 'static {
    /// Find a directory by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Directory>>;

    /// All directories owned by a user, roots included.
    async fn find_owned(&self, owner_id: Uuid) -> AppResult<Vec<Directory>>;

    /// All directories owned by a user that have a parent
    /// (everything except the Main/Trash roots; the tree index feed).
    async fn find_owned_children(&self, owner_id: Uuid) -> AppResult<Vec<Directory>>;

    /// Directories from `ids` that belong to `owner_id`; missing ids are
    /// simply absent from the result.
    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<Directory>>;

    /// Insert a batch of new directory records.
    async fn insert_many(&self, directories: &[NewDirectory]) -> AppResult<()>;

    /// Delete directories by id, scoped to the owner. Returns the number
    /// of records removed.
    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64>;

    /// Rename a directory. Returns 0 when the id matches nothing.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64>;

    /// Unconditionally re-parent a set of directories to `destination`,
    /// scoped to the owner. Returns the number of records updated.
    async fn set_parent_bulk(
        &self,
        ids: &[Uuid],
        destination: Uuid,
        owner_id: Uuid,
    ) -> AppResult<u64>;

    /// Re-parent a single directory only if its stored parent still
    /// equals `origin`, recording `previous_parent_id = origin`.
    /// Returns 0 when the optimistic check matches nothing (a no-op,
    /// not an error).
    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
    ) -> AppResult<u64>;

    /// Move a directory back to its recorded `previous_parent_id` and
    /// clear it. Returns 0 when there is nothing to restore.
    async fn restore_previous_parent(&self, id: Uuid) -> AppResult<u64>;
}

/// Store operations over file records.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Files from `ids` that belong to `owner_id`; missing ids are
    /// simply absent from the result.
    async fn find_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<Vec<File>>;

    /// All files whose parent is one of `parent_ids`.
    async fn find_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<Vec<File>>;

    /// Insert a batch of new file records.
    async fn insert_many(&self, files: &[NewFile]) -> AppResult<()>;

    /// Delete every file whose parent is in `parent_ids`. Returns the
    /// number of records removed.
    async fn delete_by_parent_ids(&self, parent_ids: &[Uuid]) -> AppResult<u64>;

    /// Delete files by id, scoped to the owner. Returns the number of
    /// records removed.
    async fn delete_by_ids_owned(&self, ids: &[Uuid], owner_id: Uuid) -> AppResult<u64>;

    /// Rename a file. Returns 0 when the id matches nothing.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<u64>;

    /// Re-parent a single file only if its stored parent still equals
    /// `origin`, recording `previous_parent_id = origin` and installing
    /// the freshly issued capability key bound to the destination.
    /// Returns 0 when the optimistic check matches nothing.
    async fn set_parent_conditional(
        &self,
        id: Uuid,
        origin: Uuid,
        destination: Uuid,
        capability_key: &str,
    ) -> AppResult<u64>;

    /// Move a file back to its recorded `previous_parent_id`, clear it,
    /// and install the reissued capability key. Returns 0 when there is
    /// nothing to restore.
    async fn restore_previous_parent(&self, id: Uuid, capability_key: &str) -> AppResult<u64>;
}

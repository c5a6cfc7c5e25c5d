//! Builds the in-memory tree index from a metadata snapshot.

use std::sync::Arc;

use uuid::Uuid;

use ncloud_core::result::AppResult;
use ncloud_entity::directory::TreeIndex;
use ncloud_entity::store::DirectoryStore;

/// Builds a [`TreeIndex`] for one user from a single linear scan of
/// their directory records.
///
/// The index is a snapshot: it is rebuilt before every operation that
/// depends on tree shape and never held across store round-trips.
#[derive(Clone)]
pub struct TreeIndexBuilder {
    directories: Arc<dyn DirectoryStore>,
}

impl TreeIndexBuilder {
    /// Creates a builder over the given directory store.
    pub fn new(directories: Arc<dyn DirectoryStore>) -> Self {
        Self { directories }
    }

    /// Builds the adjacency index over all of the user's non-root
    /// directories. Roots carry no parent edge and are never emitted by
    /// enumeration, only used as enumeration entry points.
    pub async fn build(&self, user_id: Uuid) -> AppResult<TreeIndex> {
        let records = self.directories.find_owned_children(user_id).await?;

        let mut index = TreeIndex::new();
        for record in &records {
            if let Some(parent_id) = record.parent_id {
                index.add_edge(parent_id, record.id);
            }
        }
        Ok(index)
    }
}

//! Search index projection trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// A denormalized, eventually-consistent projection of a namespace entity.
///
/// Only `id` is mandatory; partial documents are valid updates (the index
/// merges them into the stored document), which is how parent changes are
/// mirrored without re-sending the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Entity id (primary key of the index).
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Containing directory id (absent for roots).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_directory: Option<Uuid>,
    /// Owning user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
    /// Detected content kind (files only).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SearchDocument {
    /// A partial document that only relabels the parent directory.
    pub fn reparent(id: Uuid, parent_directory: Uuid) -> Self {
        Self {
            id,
            name: None,
            parent_directory: Some(parent_directory),
            user: None,
            kind: None,
        }
    }

    /// A partial document that only relabels the display name.
    pub fn renamed(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            parent_directory: None,
            user: None,
            kind: None,
        }
    }
}

/// Trait for the full-text search projection.
///
/// The engine's internal indexing and ranking are out of scope; this is
/// the write-side mirror the mutation coordinator keeps eventually
/// consistent with the metadata store.
#[async_trait]
pub trait SearchIndex: Send + Sync + 'static {
    /// Add or partially update documents in the named index.
    async fn upsert(&self, index: &str, documents: Vec<SearchDocument>) -> AppResult<()>;

    /// Delete documents from the named index by id.
    async fn delete(&self, index: &str, ids: Vec<Uuid>) -> AppResult<()>;

    /// Delete all documents matching a filter expression
    /// (e.g. `parent_directory = <id>`).
    async fn delete_by_filter(&self, index: &str, filter: &str) -> AppResult<()>;
}

/// Index holding directory projections.
pub const DIRECTORY_INDEX: &str = "directories";

/// Index holding file projections.
pub const FILE_INDEX: &str = "files";

/// Build a `field IN [..]` filter expression over a set of ids.
pub fn in_filter(field: &str, ids: &[Uuid]) -> String {
    let list = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{field} IN [{list}]")
}

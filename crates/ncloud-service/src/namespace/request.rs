//! Wire types for namespace mutations.
//!
//! Field names are part of the client contract; batches are encoded as
//! arrays of `{ id, access_key }` pairs so every element carries its own
//! proof of authority.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ncloud_entity::directory::Directory;
use ncloud_entity::file::File;

/// Request to create a directory under an existing parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryRequest {
    /// Display name for the new directory.
    pub name: String,
    /// The directory to create it under.
    pub parent_directory: Uuid,
}

/// One entity in a move batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveItem {
    /// Entity to move.
    pub id: Uuid,
    /// Capability token for the entity; must grant `modify`.
    pub access_key: String,
    /// Declared origin parent. When present, the move is conditional on
    /// the entity still living there; required for files (the token's
    /// parent binding is checked against it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_directory: Option<Uuid>,
}

/// Request to move a batch of entities into one destination directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Destination directory.
    pub id: Uuid,
    /// Capability token for the destination.
    pub access_key: String,
    /// The entities to move.
    pub items: Vec<MoveItem>,
}

/// Request to rename a directory or file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// Entity to rename.
    pub id: Uuid,
    /// Capability token for the entity; must grant `modify`.
    pub access_key: String,
    /// The new display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// One directory in a delete batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTarget {
    /// Directory to delete (with its whole subtree).
    pub id: Uuid,
    /// Capability token for the directory; must grant `delete`.
    pub access_key: String,
}

/// Request to copy directory subtrees into a destination directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    /// Destination directory.
    pub destination: Uuid,
    /// Capability token for the destination.
    pub access_key: String,
    /// Roots of the subtrees to copy.
    pub directories: Vec<Uuid>,
}

/// Request to copy files from one directory into another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFilesRequest {
    /// Directory the files currently live in.
    pub source: Uuid,
    /// Capability token for the source directory.
    pub source_access_key: String,
    /// Directory to copy the files into.
    pub destination: Uuid,
    /// Capability token for the destination directory.
    pub destination_access_key: String,
    /// The files to copy.
    pub files: Vec<Uuid>,
}

/// Request to restore trashed directories to their previous parents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreDirectoriesRequest {
    /// Directories to restore.
    pub directories: Vec<Uuid>,
}

/// Request to restore trashed files to their previous parents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreFilesRequest {
    /// Files to restore.
    pub files: Vec<Uuid>,
}

/// Count of records actually updated by a batch mutation.
///
/// No-op elements (stale origins, already-restored entities, unknown
/// ids) are simply absent from the count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdatedResponse {
    /// Number of records updated.
    pub updated: u64,
}

/// A directory together with its immediate contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// The directory itself.
    pub directory: Directory,
    /// Child directories, oldest first.
    pub directories: Vec<Directory>,
    /// Files living directly in the directory, oldest first.
    pub files: Vec<File>,
}

/// The two root directories provisioned for a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoots {
    /// The "Main" root, where regular content lives.
    pub main: Directory,
    /// The "Trash" root, the destination of undo-able moves.
    pub trash: Directory,
}

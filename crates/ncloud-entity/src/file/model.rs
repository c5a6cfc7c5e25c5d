//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A file stored in a user's namespace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name (including extension).
    pub name: String,
    /// The owning user; never changes.
    pub owner_id: Uuid,
    /// The directory containing this file.
    pub parent_id: Uuid,
    /// Set while the file sits in trash; the parent to restore to.
    pub previous_parent_id: Option<Uuid>,
    /// Detected content kind (MIME type).
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// The current signed capability token, bound to `parent_id`.
    pub capability_key: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to insert a new file record.
///
/// As with directories, the id is generated before insert so the
/// capability key can be bound to it and to the parent directory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewFile {
    /// Pre-generated file id.
    pub id: Uuid,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// The owning user.
    pub owner_id: Uuid,
    /// The containing directory.
    pub parent_id: Uuid,
    /// Detected content kind.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Capability token bound to `id` and `parent_id`.
    pub capability_key: String,
}

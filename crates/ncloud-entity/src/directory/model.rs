//! Directory entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A directory in a user's namespace.
///
/// Directories form a forest per user: every non-root directory has
/// exactly one parent, and the two roots ("Main" and "Trash") have none.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Directory {
    /// Unique directory identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The owning user; never changes.
    pub owner_id: Uuid,
    /// Containing directory (None for the Main/Trash roots).
    pub parent_id: Option<Uuid>,
    /// Set while the directory sits in trash; the parent to restore to.
    pub previous_parent_id: Option<Uuid>,
    /// The current signed capability token for this directory.
    pub capability_key: String,
    /// When the directory was created.
    pub created_at: DateTime<Utc>,
    /// When the directory was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Directory {
    /// Check if this is a root directory (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to insert a new directory record.
///
/// The id is generated by the caller before insert, because the
/// capability key is bound to it and must be issued first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDirectory {
    /// Pre-generated directory id.
    pub id: Uuid,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// The owning user.
    pub owner_id: Uuid,
    /// Containing directory (None for roots).
    pub parent_id: Option<Uuid>,
    /// Capability token bound to `id`.
    pub capability_key: String,
}

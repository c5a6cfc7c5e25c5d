//! Permission bits carried by capability tokens.

use serde::{Deserialize, Serialize};

/// A single permission embedded in a capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Read the entity and list its contents.
    Read,
    /// Rename or move the entity.
    Modify,
    /// Delete the entity.
    Delete,
    /// Upload files into the directory (directory-only permission).
    Upload,
}

impl Permission {
    /// The full permission set granted to a directory at creation.
    pub fn all() -> Vec<Permission> {
        vec![
            Permission::Read,
            Permission::Modify,
            Permission::Delete,
            Permission::Upload,
        ]
    }

    /// The restricted set granted to the Main/Trash roots, which can
    /// never be renamed or deleted.
    pub fn root_set() -> Vec<Permission> {
        vec![Permission::Read, Permission::Upload]
    }
}

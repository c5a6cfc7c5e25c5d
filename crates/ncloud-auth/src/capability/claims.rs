//! Claims payload embedded in every capability token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::permission::Permission;

/// The signed payload of a capability token.
///
/// Unlike session credentials there is no `exp` claim: capabilities are
/// durable, persisted alongside the entity, and reissued whenever a
/// structural fact they encode (the parent binding) changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityClaims {
    /// Subject: the entity id this token authorizes.
    pub sub: Uuid,
    /// The explicit permission set granted by this token.
    pub permissions: Vec<Permission>,
    /// For file tokens, the parent directory at issuance time.
    /// The token is only valid while the file still lives there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Uuid>,
}

impl CapabilityClaims {
    /// Whether the claims grant the given permission.
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

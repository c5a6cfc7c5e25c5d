//! Permission gate: allow/deny decisions over decoded capability tokens.

use uuid::Uuid;

use super::claims::CapabilityClaims;
use super::codec::CapabilityCodec;
use super::permission::Permission;

/// Decides allow/deny for a capability token and a required permission.
///
/// Every check fails closed: a token that does not decode, does not
/// match the expected id, does not match the expected parent binding,
/// or lacks the required permission bit yields `false`.
///
/// This is one of two authorization strategies in ncloud; the other is
/// the ownership record scan (`owner_id`-scoped queries) used by read
/// paths and restore. The two must not be conflated.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    codec: CapabilityCodec,
}

impl PermissionGate {
    /// Creates a gate over the given codec.
    pub fn new(codec: CapabilityCodec) -> Self {
        Self { codec }
    }

    /// Decodes a token without any equality checks.
    pub fn decode(&self, token: &str) -> Option<CapabilityClaims> {
        self.codec.decode(token)
    }

    /// Whether the token decodes and its subject equals `expected_id`.
    ///
    /// Used for destination checks: holding any valid token for a
    /// directory proves the right to address it as a move/copy target.
    pub fn matches_id(&self, token: &str, expected_id: Uuid) -> bool {
        match self.codec.decode(token) {
            Some(claims) => claims.sub == expected_id,
            None => false,
        }
    }

    /// Whether the token authorizes `required` on the entity
    /// `expected_id` (if given).
    pub fn authorize(
        &self,
        token: &str,
        required: Permission,
        expected_id: Option<Uuid>,
    ) -> bool {
        let Some(claims) = self.codec.decode(token) else {
            return false;
        };
        if let Some(expected) = expected_id {
            if claims.sub != expected {
                return false;
            }
        }
        claims.grants(required)
    }

    /// Whether a file token authorizes `required` on `expected_id` while
    /// the file still lives under `expected_parent`.
    ///
    /// A token issued before a move carries the old parent binding and
    /// is rejected here even though its signature is still valid.
    pub fn authorize_file(
        &self,
        token: &str,
        required: Permission,
        expected_id: Uuid,
        expected_parent: Uuid,
    ) -> bool {
        let Some(claims) = self.codec.decode(token) else {
            return false;
        };
        claims.sub == expected_id
            && claims.parent == Some(expected_parent)
            && claims.grants(required)
    }
}

//! Capability token encoding and decoding.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use ncloud_core::config::auth::AuthConfig;
use ncloud_core::error::AppError;
use ncloud_core::result::AppResult;

use super::claims::CapabilityClaims;
use super::permission::Permission;

/// Issues and verifies capability tokens.
///
/// Holds one process-wide immutable signing key injected at startup.
/// Validity is solely signature plus caller-side equality checks; there
/// is no in-memory revocation state.
#[derive(Clone)]
pub struct CapabilityCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation settings (signature only, no expiry).
    validation: Validation,
}

impl std::fmt::Debug for CapabilityCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityCodec").finish_non_exhaustive()
    }
}

impl CapabilityCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Capabilities are durable: no exp claim is issued or required.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(config.capability_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.capability_secret.as_bytes()),
            validation,
        }
    }

    /// Issues a signed capability token for an entity.
    ///
    /// `parent` carries the parent-directory binding for file tokens and
    /// is `None` for directory tokens.
    pub fn issue(
        &self,
        id: Uuid,
        permissions: Vec<Permission>,
        parent: Option<Uuid>,
    ) -> AppResult<String> {
        let claims = CapabilityClaims {
            sub: id,
            permissions,
            parent,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode capability token: {e}")))
    }

    /// Issues a directory token with the full permission set.
    pub fn issue_directory(&self, id: Uuid) -> AppResult<String> {
        self.issue(id, Permission::all(), None)
    }

    /// Issues a file token bound to the file's current parent directory.
    pub fn issue_file(&self, id: Uuid, parent: Uuid) -> AppResult<String> {
        self.issue(id, Permission::all(), Some(parent))
    }

    /// Decodes and verifies a capability token.
    ///
    /// Never fails loudly on malformed input: any decode or signature
    /// problem yields `None`, and callers must check before trusting any
    /// field.
    pub fn decode(&self, token: &str) -> Option<CapabilityClaims> {
        decode::<CapabilityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}

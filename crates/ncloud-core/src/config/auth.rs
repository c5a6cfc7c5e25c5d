//! Capability token configuration.

use serde::{Deserialize, Serialize};

/// Capability token signing configuration.
///
/// The secret is process-wide and immutable; rotating it invalidates
/// every issued capability key at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for capability token signing (HMAC-SHA256).
    #[serde(default = "default_capability_secret")]
    pub capability_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            capability_secret: default_capability_secret(),
        }
    }
}

fn default_capability_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

//! Search index projection configuration.

use serde::{Deserialize, Serialize};

/// Meilisearch projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Meilisearch instance.
    #[serde(default = "default_url")]
    pub url: String,
    /// API key used as a bearer token (empty for unsecured instances).
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:7700".to_string()
}

fn default_timeout() -> u64 {
    10
}

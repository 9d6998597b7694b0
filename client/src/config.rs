use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the public Postman API.
pub const DEFAULT_BASE_URL: &str = "https://api.getpostman.com";

/// Configuration options for a [`PostmanClient`](crate::PostmanClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key sent in the `X-API-Key` header
    #[serde(default)]
    pub api_key: String,
    /// Base URL the resource paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Overall timeout for a single request, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the public API with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

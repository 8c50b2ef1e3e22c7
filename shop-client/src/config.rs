//! Client configuration

use std::time::Duration;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Client configuration for connecting to the shop backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://127.0.0.1:8000/")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create a network HTTP client bound to `session`
    pub fn build_http_client(
        &self,
        session: crate::Session,
    ) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self, session)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

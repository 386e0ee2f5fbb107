//! Client configuration.

use std::time::Duration;

/// Production base URL of the platform.
pub const DEFAULT_BASE_URL: &str = "https://www.lernsax.de";

/// Default timeout applied to every HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`Client`](crate::Client).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the platform, without trailing slash.
    pub base_url: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different deployment (e.g. a mock server
    /// in tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The JSON-RPC batch endpoint.
    #[must_use]
    pub fn rpc_endpoint(&self) -> String {
        format!("{}/jsonrpc.php", self.base_url)
    }

    /// The legacy task listing page, keyed by session token.
    #[must_use]
    pub fn tasks_url(&self, session_id: &str) -> String {
        format!("{}/wws/105500.php?sid={session_id}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://www.lernsax.de");
        assert_eq!(config.rpc_endpoint(), "https://www.lernsax.de/jsonrpc.php");
    }

    #[test]
    fn tasks_url_carries_session_token() {
        let config = ClientConfig::with_base_url("http://localhost:9999");
        assert_eq!(
            config.tasks_url("tok-1"),
            "http://localhost:9999/wws/105500.php?sid=tok-1"
        );
    }
}

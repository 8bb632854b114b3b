//! HTTP client configuration module
//!
//! Centralises timeouts and connection settings for the provider client.

use crate::error::AppResult;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Idle connections kept per host
    pub max_idle_per_host: usize,
    /// Keep the session cookie between requests
    pub cookie_store: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(45),
            max_idle_per_host: 4,
            cookie_store: true,
        }
    }
}

impl HttpConfig {
    /// Create default HTTP config
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for schema provisioning; admin calls can be slow on a cold project.
    pub fn provisioning() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(90),
            max_idle_per_host: 2,
            cookie_store: false,
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> AppResult<Client> {
        Ok(ClientBuilder::new()
            .user_agent(concat!("focusflow/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(self.max_idle_per_host)
            .cookie_store(self.cookie_store)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_profile_is_more_patient() {
        let default = HttpConfig::new();
        let provisioning = HttpConfig::provisioning();
        assert!(provisioning.timeout > default.timeout);
        assert!(!provisioning.cookie_store);
    }

    #[test]
    fn test_build_client() {
        assert!(HttpConfig::default().build_client().is_ok());
    }
}

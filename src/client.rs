//! Shared HTTP client construction.

use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings applied to every outbound request.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

pub fn build_client(config: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .build()
}

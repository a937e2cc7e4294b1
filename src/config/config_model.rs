use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Large uploads go through the same client, so every call gets ten minutes.
pub const REQUEST_TIMEOUT_MS: u64 = 600_000;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

use anyhow::{Context, Result, bail};
use url::Url;

use super::config_model::{DEFAULT_API_URL, DotEnvyConfig, GatewayConfig};

pub const API_URL_VAR: &str = "VIDEO_API_URL";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let gateway = gateway_config(std::env::var(API_URL_VAR).ok())?;

    Ok(DotEnvyConfig { gateway })
}

/// Builds the gateway config from an optional base URL override.
pub fn gateway_config(api_url: Option<String>) -> Result<GatewayConfig> {
    let raw = api_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let parsed = Url::parse(&raw).with_context(|| format!("{} is invalid: {}", API_URL_VAR, raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("{} must use http or https, got {}", API_URL_VAR, parsed.scheme());
    }

    Ok(GatewayConfig::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_model::REQUEST_TIMEOUT_MS;
    use std::time::Duration;

    #[test]
    fn falls_back_to_local_server() {
        let config = gateway_config(None).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout, Duration::from_millis(REQUEST_TIMEOUT_MS));
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = gateway_config(Some("   ".to_string())).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn override_is_used_without_trailing_slash() {
        let config = gateway_config(Some("https://videos.example.com/api/".to_string())).unwrap();
        assert_eq!(config.base_url, "https://videos.example.com/api");
    }

    #[test]
    fn rejects_unusable_urls() {
        for raw in ["not a url", "ftp://videos.example.com"] {
            let err = gateway_config(Some(raw.to_string())).unwrap_err().to_string();
            assert!(err.contains(API_URL_VAR), "got: {err}");
        }
    }
}

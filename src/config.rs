use std::env;

use anyhow::{anyhow, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub log_level: String,
    pub vision_endpoint: String,
    pub vision_key: String,
    pub generation_endpoint: String,
    pub generation_key: String,
    pub generation_deployment: String,
    pub generation_api_version: String,
    pub generation_timeout_secs: u64,
    pub max_image_bytes: usize,
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}

fn required_env(name: &str) -> Result<String> {
    let value = env::var(name).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(anyhow!("{name} is required"));
    }
    Ok(value)
}

/// Service endpoints are joined with relative paths, so they must end in '/'.
fn normalize_endpoint(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    Url::parse(trimmed).map_err(|err| anyhow!("{name} is not a valid URL: {err}"))?;
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let vision_endpoint = required_env("VISION_ENDPOINT")?;
        let generation_endpoint = required_env("GENERATION_ENDPOINT")?;

        Ok(Config {
            bind_addr: env_string("BIND_ADDR", "0.0.0.0:5000"),
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            vision_endpoint: normalize_endpoint("VISION_ENDPOINT", &vision_endpoint)?,
            vision_key: required_env("VISION_KEY")?,
            generation_endpoint: normalize_endpoint("GENERATION_ENDPOINT", &generation_endpoint)?,
            generation_key: required_env("GENERATION_KEY")?,
            generation_deployment: env_string("GENERATION_DEPLOYMENT", "dep-03"),
            generation_api_version: env_string("GENERATION_API_VERSION", "2024-02-15-preview"),
            generation_timeout_secs: env_u64("GENERATION_TIMEOUT_SECS", 120),
            max_image_bytes: env_usize("MAX_IMAGE_BYTES", 10 * 1024 * 1024),
        })
    }
}

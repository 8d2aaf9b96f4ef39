use std::fmt::Display;
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if either API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub rapidapi_key: String,
    pub openai_api_key: String,
    pub jsearch_base_url: String,
    pub jsearch_host: String,
    pub openai_base_url: String,
    pub http_timeout: Duration,
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
    pub session_ttl_minutes: i64,
    pub session_sweep_interval: Duration,
    pub profile_url: String,
    pub port: u16,
    pub rust_log: String,
}

pub const DEFAULT_JSEARCH_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
pub const DEFAULT_JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PROFILE_URL: &str = "https://www.linkedin.com/in/josh-poresky956/";

/// Idle sessions live at least a minute and at most 30 days.
pub const SESSION_TTL_MINUTES_RANGE: RangeInclusive<i64> = 1..=43_200;
/// The sweeper ticks at most once a second and at least once a day.
pub const SESSION_SWEEP_SECS_RANGE: RangeInclusive<u64> = 1..=86_400;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            rapidapi_key: require_env_any(&["RAPIDAPI_KEY", "RapidAPI"])?,
            openai_api_key: require_env_any(&["OPENAI_API_KEY", "General"])?,
            jsearch_base_url: env_or("JSEARCH_BASE_URL", DEFAULT_JSEARCH_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            jsearch_host: env_or("JSEARCH_HOST", DEFAULT_JSEARCH_HOST),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            http_timeout: Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 30)?),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_ttl_minutes: parse_env_in("SESSION_TTL_MINUTES", 60, SESSION_TTL_MINUTES_RANGE)?,
            session_sweep_interval: Duration::from_secs(parse_env_in(
                "SESSION_SWEEP_SECS",
                60,
                SESSION_SWEEP_SECS_RANGE,
            )?),
            profile_url: env_or("PROFILE_URL", DEFAULT_PROFILE_URL),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Reads the first set variable among `keys`. Later keys are legacy aliases.
fn require_env_any(keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .with_context(|| {
            format!(
                "Required environment variable '{}' is not set",
                keys.join("' or '")
            )
        })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Like `parse_env`, but the value must fall inside `allowed`.
fn parse_env_in<T>(key: &str, default: T, allowed: RangeInclusive<T>) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse_env(key, default)?;
    if !allowed.contains(&value) {
        bail!(
            "Environment variable '{key}' must be between {} and {}, got {value}",
            allowed.start(),
            allowed.end()
        );
    }
    Ok(value)
}

#[cfg(test)]
impl Config {
    /// Config pointing at unroutable upstreams; tests inject doubles instead.
    pub fn for_tests() -> Self {
        Config {
            rapidapi_key: "test-rapidapi-key".to_string(),
            openai_api_key: "test-openai-key".to_string(),
            jsearch_base_url: "http://127.0.0.1:9".to_string(),
            jsearch_host: DEFAULT_JSEARCH_HOST.to_string(),
            openai_base_url: "http://127.0.0.1:9".to_string(),
            http_timeout: Duration::from_secs(1),
            llm_timeout: Duration::from_secs(1),
            max_upload_bytes: 1024 * 1024,
            session_ttl_minutes: 60,
            session_sweep_interval: Duration::from_secs(60),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SPLUNK_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue naming the variable.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::AuthType;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, reporting `expected` on failure.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: format!("must be {expected}"),
            })
        })
        .transpose()
}

fn secs_env(key: &str) -> Result<Option<Duration>, ConfigError> {
    Ok(parse_env::<u64>(key, "a number of seconds")?.map(Duration::from_secs))
}

/// Apply environment variable configuration to the loader.
///
/// Only variables that are set overwrite values already on the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SPLUNK_BASE_URL") {
        loader.base_url = Some(url);
    }
    if let Some(auth_type) = env_var_or_none("SPLUNK_AUTH_TYPE") {
        let parsed = auth_type
            .parse::<AuthType>()
            .map_err(|message| ConfigError::InvalidValue {
                var: "SPLUNK_AUTH_TYPE".to_string(),
                message,
            })?;
        loader.auth_type = Some(parsed);
    }
    if let Some(username) = env_var_or_none("SPLUNK_USERNAME") {
        loader.username = Some(username);
    }
    if let Some(password) = env_var_or_none("SPLUNK_PASSWORD") {
        loader.password = Some(SecretString::new(password.into()));
    }
    if let Some(token) = env_var_or_none("SPLUNK_API_TOKEN") {
        loader.api_token = Some(SecretString::new(token.into()));
    }
    if let Some(skip) = parse_env("SPLUNK_SKIP_VERIFY", "true or false")? {
        loader.skip_verify = Some(skip);
    }
    if let Some(timeout) = secs_env("SPLUNK_TIMEOUT")? {
        loader.timeout = Some(timeout);
    }
    if let Some(retries) = parse_env("SPLUNK_MAX_RETRIES", "a non-negative integer")? {
        loader.max_retries = Some(retries);
    }
    if let Some(ttl) = parse_env("SPLUNK_SESSION_TTL", "a number of seconds")? {
        loader.session_ttl_seconds = Some(ttl);
    }
    if let Some(max_count) = parse_env("SPLUNK_MAX_COUNT", "a non-negative integer")? {
        loader.max_count = Some(max_count);
    }
    if let Some(allow) = parse_env("SPLUNK_ALLOW_PARTITION", "true or false")? {
        loader.allow_partition = Some(allow);
    }
    if let Some(count) = parse_env("SPLUNK_PARTITION_COUNT", "a positive integer")? {
        loader.partition_count = Some(count);
    }
    if let Some(interval) = secs_env("SPLUNK_POLL_INTERVAL")? {
        loader.poll_interval = Some(interval);
    }
    if let Some(max_wait) = secs_env("SPLUNK_MAX_WAIT")? {
        loader.max_wait = Some(max_wait);
    }
    if let Some(max_polls) = parse_env("SPLUNK_MAX_POLLS", "a positive integer")? {
        loader.max_polls = Some(max_polls);
    }
    Ok(())
}

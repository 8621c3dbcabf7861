//! TOML connection file loading.
//!
//! The file uses kebab-case keys, one connection per file:
//!
//! ```toml
//! host = "https://splunk.example.com:8089"
//! auth-type = "authorization-token"
//! username = "admin"
//! password = "changeme"
//! max-count = 10000
//! allow-partition = true
//! ```
//!
//! Unknown keys are ignored so files written for other Splunk tooling still load.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::AuthType;

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConnectionFile {
    host: Option<String>,
    auth_type: Option<AuthType>,
    username: Option<String>,
    password: Option<String>,
    authentication_token: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<u64>,
    max_retries: Option<usize>,
    session_ttl: Option<u64>,
    max_count: Option<usize>,
    allow_partition: Option<bool>,
    partition_count: Option<usize>,
    poll_interval: Option<u64>,
    max_wait: Option<u64>,
    max_polls: Option<u32>,
}

/// Parse the file at `path` and overlay every key it sets onto the loader.
pub fn apply_file(loader: &mut ConfigLoader, path: &Path) -> Result<(), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConnectionFile =
        toml::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "Loaded connection file");

    overlay(&mut loader.base_url, file.host);
    overlay(&mut loader.auth_type, file.auth_type);
    overlay(&mut loader.username, file.username);
    overlay(
        &mut loader.password,
        file.password.map(|p| SecretString::new(p.into())),
    );
    overlay(
        &mut loader.api_token,
        file.authentication_token
            .map(|t| SecretString::new(t.into())),
    );
    overlay(&mut loader.skip_verify, file.skip_verify);
    overlay(&mut loader.timeout, file.timeout.map(Duration::from_secs));
    overlay(&mut loader.max_retries, file.max_retries);
    overlay(&mut loader.session_ttl_seconds, file.session_ttl);
    overlay(&mut loader.max_count, file.max_count);
    overlay(&mut loader.allow_partition, file.allow_partition);
    overlay(&mut loader.partition_count, file.partition_count);
    overlay(
        &mut loader.poll_interval,
        file.poll_interval.map(Duration::from_secs),
    );
    overlay(&mut loader.max_wait, file.max_wait.map(Duration::from_secs));
    overlay(&mut loader.max_polls, file.max_polls);
    Ok(())
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

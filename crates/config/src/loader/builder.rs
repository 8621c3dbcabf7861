//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from environment variables, TOML files, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Connection file parsing (delegated to file.rs).

use secrecy::SecretString;
use std::path::Path;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{
    DEFAULT_MAX_COUNT, DEFAULT_MAX_RETRIES, DEFAULT_PARTITION_COUNT, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_SESSION_TTL_SECS, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_SESSION_TTL_SECS,
    MAX_TIMEOUT_SECS, MIN_PARTITION_COUNT,
};
use crate::types::{AuthConfig, AuthStrategy, AuthType, Config, ConnectionConfig, SearchConfig};

/// Configuration loader that builds config from files, environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    pub(super) base_url: Option<String>,
    pub(super) auth_type: Option<AuthType>,
    pub(super) username: Option<String>,
    pub(super) password: Option<SecretString>,
    pub(super) api_token: Option<SecretString>,
    pub(super) skip_verify: Option<bool>,
    pub(super) timeout: Option<Duration>,
    pub(super) max_retries: Option<usize>,
    pub(super) session_ttl_seconds: Option<u64>,
    pub(super) max_count: Option<usize>,
    pub(super) allow_partition: Option<bool>,
    pub(super) partition_count: Option<usize>,
    pub(super) poll_interval: Option<Duration>,
    pub(super) max_wait: Option<Duration>,
    pub(super) max_polls: Option<u32>,
}

impl ConfigLoader {
    /// Create a new configuration loader with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read settings from a TOML connection file.
    pub fn from_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        apply_file(&mut self, path.as_ref())?;
        Ok(self)
    }

    /// Read configuration from `SPLUNK_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Force a particular authentication scheme.
    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the row cap requested for each search job.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Allow or forbid partitioning of truncated searches.
    pub fn with_allow_partition(mut self, allow: bool) -> Self {
        self.allow_partition = Some(allow);
        self
    }

    /// Set the number of sub-windows per partitioning step.
    pub fn with_partition_count(mut self, count: usize) -> Self {
        self.partition_count = Some(count);
        self
    }

    /// Set the delay between job status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Bound the total time spent waiting for a job.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Bound the number of status polls per job.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Resolve the authentication strategy from whatever credentials were provided.
    ///
    /// An explicit auth type demands its credentials. Without one, an API token
    /// wins over username/password, which fall back to session login.
    fn resolve_strategy(
        auth_type: Option<AuthType>,
        username: Option<String>,
        password: Option<SecretString>,
        api_token: Option<SecretString>,
    ) -> Result<AuthStrategy, ConfigError> {
        match auth_type {
            Some(AuthType::AuthenticationToken) => api_token
                .map(|token| AuthStrategy::ApiToken { token })
                .ok_or(ConfigError::MissingCredentials {
                    auth_type: AuthType::AuthenticationToken,
                    missing: "an API token",
                }),
            Some(auth_type @ (AuthType::Basic | AuthType::AuthorizationToken)) => {
                match (username, password) {
                    (Some(username), Some(password)) if auth_type == AuthType::Basic => {
                        Ok(AuthStrategy::Basic { username, password })
                    }
                    (Some(username), Some(password)) => {
                        Ok(AuthStrategy::SessionToken { username, password })
                    }
                    _ => Err(ConfigError::MissingCredentials {
                        auth_type,
                        missing: "a username and password",
                    }),
                }
            }
            None => {
                if let Some(token) = api_token {
                    Ok(AuthStrategy::ApiToken { token })
                } else if let (Some(username), Some(password)) = (username, password) {
                    Ok(AuthStrategy::SessionToken { username, password })
                } else {
                    Err(ConfigError::MissingAuth)
                }
            }
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let strategy =
            Self::resolve_strategy(self.auth_type, self.username, self.password, self.api_token)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            session_ttl_seconds: self.session_ttl_seconds.unwrap_or(DEFAULT_SESSION_TTL_SECS),
        };
        validate_connection(&connection)?;

        let search = SearchConfig {
            // zero is the "use the default" sentinel
            max_count: match self.max_count {
                Some(0) | None => DEFAULT_MAX_COUNT,
                Some(n) => n,
            },
            allow_partition: self.allow_partition.unwrap_or(false),
            partition_count: self.partition_count.unwrap_or(DEFAULT_PARTITION_COUNT),
            poll_interval: self
                .poll_interval
                .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
            max_wait: self.max_wait,
            max_polls: self.max_polls,
        };
        validate_search(&search)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
            search,
        })
    }
}

fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
    let timeout_secs = connection.timeout.as_secs();
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }

    if connection.session_ttl_seconds == 0 || connection.session_ttl_seconds > MAX_SESSION_TTL_SECS
    {
        return Err(ConfigError::InvalidSessionTtl {
            message: format!(
                "session_ttl_seconds must be between 1 and {} (got {})",
                MAX_SESSION_TTL_SECS, connection.session_ttl_seconds
            ),
        });
    }

    if connection.max_retries > MAX_MAX_RETRIES {
        return Err(ConfigError::InvalidValue {
            var: "max_retries".to_string(),
            message: format!(
                "must be between 0 and {} (got {})",
                MAX_MAX_RETRIES, connection.max_retries
            ),
        });
    }

    Ok(())
}

fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
    if search.partition_count < MIN_PARTITION_COUNT {
        return Err(ConfigError::InvalidSearch {
            message: format!(
                "partition_count must be at least {} (got {})",
                MIN_PARTITION_COUNT, search.partition_count
            ),
        });
    }
    if search.poll_interval.is_zero() {
        return Err(ConfigError::InvalidSearch {
            message: "poll_interval must be greater than 0".to_string(),
        });
    }
    if search.max_polls == Some(0) {
        return Err(ConfigError::InvalidSearch {
            message: "max_polls must be greater than 0 when set".to_string(),
        });
    }
    Ok(())
}

/// Validate a base URL and strip trailing slashes.
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:8089): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:8089), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://localhost:8089)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

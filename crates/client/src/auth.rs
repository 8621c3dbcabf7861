//! Authentication strategies and session management.
//!
//! # What this module handles:
//! - Turning an [`AuthStrategy`] into the `Authorization` header value
//! - Tracking the session key obtained by logging in, with a sliding lifetime
//!
//! # What this module does NOT handle:
//! - The login HTTP call (see [`crate::endpoints::login`])
//! - Serializing concurrent logins (the client holds the manager behind a mutex)
//!
//! # Invariants
//! - A session key's deadline moves forward every time the key is handed out.
//! - Basic and bearer strategies never need a login.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::time::Instant;

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// HTTP basic auth; credentials travel with every request.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Username and password exchanged for a session key at `/services/auth/login`.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication).
    ApiToken { token: SecretString },
}

/// Session key with a sliding expiry.
#[derive(Debug)]
struct SessionKey {
    value: SecretString,
    expires_at: Instant,
}

/// Produces `Authorization` headers and remembers the current session key.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session_key: Option<SessionKey>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager whose session keys live for `ttl` after last use.
    pub fn new(strategy: AuthStrategy, ttl: Duration) -> Self {
        Self {
            auth_strategy: strategy,
            session_key: None,
            ttl,
        }
    }

    /// Get the current auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Whether a login is required before the next request.
    pub fn needs_login(&self) -> bool {
        match self.auth_strategy {
            AuthStrategy::SessionToken { .. } => self
                .session_key
                .as_ref()
                .is_none_or(|key| key.expires_at <= Instant::now()),
            AuthStrategy::Basic { .. } | AuthStrategy::ApiToken { .. } => false,
        }
    }

    /// Store a freshly obtained session key.
    pub fn set_session_key(&mut self, key: String) {
        self.session_key = Some(SessionKey {
            value: SecretString::new(key.into()),
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Forget the session key, forcing a login on next use.
    pub fn clear_session(&mut self) {
        self.session_key = None;
    }

    /// The `Authorization` header value for the next request.
    ///
    /// Returns `None` when the session strategy has no live key. Handing out a
    /// session key extends its lifetime by the configured TTL.
    pub fn authorization_header(&mut self) -> Option<String> {
        match &self.auth_strategy {
            AuthStrategy::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password.expose_secret());
                Some(format!("Basic {}", STANDARD.encode(credentials)))
            }
            AuthStrategy::ApiToken { token } => Some(format!("Bearer {}", token.expose_secret())),
            AuthStrategy::SessionToken { .. } => {
                let now = Instant::now();
                let key = self.session_key.as_mut().filter(|k| k.expires_at > now)?;
                key.expires_at = now + self.ttl;
                Some(format!("Splunk {}", key.value.expose_secret()))
            }
        }
    }
}

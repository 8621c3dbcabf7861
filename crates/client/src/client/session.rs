//! Client-level session helpers.
//!
//! # Invariants
//! - The session mutex is held across the login call, so concurrent callers
//!   that need a key wait for the one login already running and then reuse its key.
//! - Basic and bearer strategies never trigger a login.

use secrecy::ExposeSecret;
use tracing::debug;

use crate::auth::AuthStrategy;
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};

impl SplunkClient {
    /// The `Authorization` header value for the next request, logging in if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if login fails.
    pub(crate) async fn authorization_header(&self) -> Result<String> {
        let mut session = self.session.lock().await;

        if session.needs_login() {
            let key = self.request_session_key(session.strategy()).await?;
            session.set_session_key(key);
        }

        session
            .authorization_header()
            .ok_or_else(|| ClientError::AuthFailed("no valid session key".to_string()))
    }

    /// Log in now, replacing any current session key.
    ///
    /// Only meaningful for [`AuthStrategy::SessionToken`].
    pub async fn login(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        let key = self.request_session_key(session.strategy()).await?;
        session.set_session_key(key);
        Ok(())
    }

    /// Check if the client logs in for a session key.
    pub fn uses_session_login(&self) -> bool {
        self.session_login
    }

    async fn request_session_key(&self, strategy: &AuthStrategy) -> Result<String> {
        let AuthStrategy::SessionToken { username, password } = strategy else {
            return Err(ClientError::AuthFailed(
                "Cannot login without a username/password session strategy".to_string(),
            ));
        };

        debug!("Requesting new session key");
        endpoints::login(
            &self.http,
            &self.base_url,
            username,
            password.expose_secret(),
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}

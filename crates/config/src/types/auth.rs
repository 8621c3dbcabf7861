//! Authentication types for splunk-rest configuration.
//!
//! Responsibilities:
//! - Define the three authentication schemes Splunk accepts.
//! - Parse the `auth-type` names used in connection files.
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Actual authentication flow or session key exchange (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for config file persistence; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Name of an authentication scheme, as written in connection files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    /// HTTP basic auth with username and password on every request.
    #[serde(rename = "basic")]
    Basic,
    /// Static bearer token.
    #[serde(rename = "authentication-token")]
    AuthenticationToken,
    /// Session key obtained by logging in with username and password.
    #[serde(rename = "authorization-token")]
    AuthorizationToken,
}

impl AuthType {
    /// Every supported authentication type, in display order.
    pub const fn all() -> [AuthType; 3] {
        [
            AuthType::Basic,
            AuthType::AuthenticationToken,
            AuthType::AuthorizationToken,
        ]
    }

    /// The connection-file name of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthType::Basic => "basic",
            AuthType::AuthenticationToken => "authentication-token",
            AuthType::AuthorizationToken => "authorization-token",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthType::all()
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("cannot parse [{s}] as an authentication type"))
    }
}

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// HTTP basic authentication.
    #[serde(rename = "basic")]
    Basic {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// Username and password exchanged for a session key.
    #[serde(rename = "authorization-token")]
    SessionToken {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// API token (bearer token authentication).
    #[serde(rename = "authentication-token")]
    ApiToken {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

impl AuthStrategy {
    /// The [`AuthType`] this strategy corresponds to.
    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthStrategy::Basic { .. } => AuthType::Basic,
            AuthStrategy::SessionToken { .. } => AuthType::AuthorizationToken,
            AuthStrategy::ApiToken { .. } => AuthType::AuthenticationToken,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_from_str() {
        assert_eq!("basic".parse::<AuthType>(), Ok(AuthType::Basic));
        assert_eq!(
            "authentication-token".parse::<AuthType>(),
            Ok(AuthType::AuthenticationToken)
        );
        assert_eq!(
            " authorization-token ".parse::<AuthType>(),
            Ok(AuthType::AuthorizationToken)
        );
    }

    #[test]
    fn test_auth_type_from_str_rejects_unknown() {
        let err = "kerberos".parse::<AuthType>().unwrap_err();
        assert!(err.contains("kerberos"));
    }

    #[test]
    fn test_auth_type_display_matches_serde_name() {
        for auth_type in AuthType::all() {
            let json = serde_json::to_string(&auth_type).unwrap();
            assert_eq!(json, format!("\"{}\"", auth_type));
        }
    }

    #[test]
    fn test_auth_strategy_serde_round_trip() {
        let token = SecretString::new("test-token".to_string().into());
        let original = AuthStrategy::ApiToken { token };

        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("authentication-token"));
        let deserialized: AuthStrategy = serde_json::from_str(&json).unwrap();

        assert!(matches!(deserialized, AuthStrategy::ApiToken { .. }));
    }

    #[test]
    fn test_auth_strategy_auth_type() {
        let password = SecretString::new("pw".to_string().into());
        let basic = AuthStrategy::Basic {
            username: "admin".to_string(),
            password: password.clone(),
        };
        let session = AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password,
        };
        assert_eq!(basic.auth_type(), AuthType::Basic);
        assert_eq!(session.auth_type(), AuthType::AuthorizationToken);
    }

    /// Test that AuthConfig Debug output does not expose secrets.
    #[test]
    fn test_auth_config_debug_does_not_expose_secrets() {
        let auth_config = AuthConfig {
            strategy: AuthStrategy::Basic {
                username: "admin".to_string(),
                password: SecretString::new("basic-secret-456".to_string().into()),
            },
        };

        let debug_output = format!("{:?}", auth_config);

        assert!(!debug_output.contains("basic-secret-456"));
        assert!(debug_output.contains("admin"));
    }
}

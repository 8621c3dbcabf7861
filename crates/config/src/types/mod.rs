//! Configuration types.
//!
//! Split by concern: authentication, connection, and search behavior.

pub mod auth;
pub mod connection;
pub mod search;

pub use auth::{AuthConfig, AuthStrategy, AuthType};
pub use connection::{Config, ConnectionConfig};
pub use search::SearchConfig;

//! Configuration management for splunk-rest.
//!
//! This crate provides types and loaders for managing Splunk connection,
//! authentication, and search configuration from environment variables,
//! `.env` files, and TOML connection files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, AuthType, Config, ConnectionConfig, SearchConfig};

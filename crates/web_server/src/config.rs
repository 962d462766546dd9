use std::str::FromStr;

use campground_store::database::DEFAULT_DATABASE_URL;

/// Address the server listens on when `BIND_ADDRESS` is not set
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Which store implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL through `DATABASE_URL`
    Postgres,
    /// In-process store, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

/// Custom error type for configuration problems
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// `CAMPGROUND_STORE` names a backend that does not exist
    #[error("Unknown store backend '{0}', expected 'postgres' or 'memory'")]
    UnknownStore(String),
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `host:port` to bind
    pub bind_address: String,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Store implementation to use
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    /// Reads the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_backend = match lookup("CAMPGROUND_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::Postgres,
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            store_backend,
        })
    }
}

use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_DATABASE_PATH: &str = "/data/weight-tracker.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Configuration errors reported at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite file path, or `:memory:`
    pub database_path: String,

    /// Interface to listen on
    pub bind_address: String,

    /// TCP port to listen on
    pub port: u16,

    /// Single origin allowed by CORS
    pub cors_origin: String,

    /// Maximum pooled database connections
    pub pool_max_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    ///
    /// `DATABASE_PATH`, `BIND_ADDRESS`, `PORT`, `CORS_ORIGIN`, `DB_POOL_MAX_SIZE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// Unset or empty variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            database_path: var("DATABASE_PATH").unwrap_or(defaults.database_path),
            bind_address: var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: parse_var("PORT", var("PORT"), defaults.port)?,
            cors_origin: var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            pool_max_size: parse_var("DB_POOL_MAX_SIZE", var("DB_POOL_MAX_SIZE"), defaults.pool_max_size)?,
        })
    }

    /// Socket address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_address, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            key: "BIND_ADDRESS",
            value: self.bind_address.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_var<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const SUPPORTED_SCHEMES: &[&str] = &["postgres://", "postgresql://", "sqlite:"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("DATABASE_URL has an unsupported scheme (expected postgres:// or sqlite:)")]
    UnsupportedDatabaseUrl,

    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("DATABASE_MAX_CONNECTIONS must be a positive number, got {0:?}")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
        if !SUPPORTED_SCHEMES
            .iter()
            .any(|scheme| database_url.starts_with(scheme))
        {
            return Err(ConfigError::UnsupportedDatabaseUrl);
        }

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(raw)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            host,
            port,
            database_url,
            max_connections,
        })
    }
}

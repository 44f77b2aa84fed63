//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 8000)
//! - `STORE_BACKEND` - `memory`, `file` or `postgres` (default: memory)
//! - `STORE_DATA_DIR` - Data directory for the file backend (default: data,
//!   falls back to `DB_PATH`)
//! - `STORE_DATABASE_URL` - `PostgreSQL` connection string, required for the
//!   postgres backend (falls back to `DATABASE_URL`)
//! - `STORE_DEFAULTS_PATH` - Default-data TOML file (default: default.toml)
//! - `STORE_SEED_DEFAULTS` - Seed default data at startup (default: true)
//! - `STORE_LOG_JSON` - Emit JSON logs when set to true
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the repositories keep their data.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Process-local maps.
    Memory,
    /// JSON documents in a directory.
    File(PathBuf),
    /// `PostgreSQL` database (URL contains password).
    Postgres(SecretString),
}

impl Backend {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Storage backend
    pub backend: Backend,
    /// Default-data file read at startup
    pub defaults_path: PathBuf,
    /// Whether to seed default data at startup
    pub seed_defaults: bool,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for ApiConfig {
    /// In-memory backend on the default address, seeding built-in data.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            backend: Backend::Memory,
            defaults_path: PathBuf::from("default.toml"),
            seed_defaults: true,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, or if the postgres
    /// backend is selected without a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = match get_env_or_default("STORE_BACKEND", "memory").as_str() {
            "memory" => Backend::Memory,
            "file" => Backend::File(get_data_dir()),
            "postgres" => Backend::Postgres(get_database_url("STORE_DATABASE_URL")?),
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STORE_BACKEND".to_string(),
                    format!("unknown backend '{other}' (expected memory, file or postgres)"),
                ));
            }
        };

        Ok(Self {
            host: get_parsed_or_default("STORE_HOST", "127.0.0.1")?,
            port: get_parsed_or_default("STORE_PORT", "8000")?,
            backend,
            defaults_path: PathBuf::from(get_env_or_default("STORE_DEFAULTS_PATH", "default.toml")),
            seed_defaults: get_bool_or_default("STORE_SEED_DEFAULTS", true)?,
            log_json: get_bool_or_default("STORE_LOG_JSON", false)?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_parsed_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: get_parsed_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` naming `primary_key` if neither is set.
pub fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Data directory with fallback to the legacy `DB_PATH`.
fn get_data_dir() -> PathBuf {
    get_optional_env("STORE_DATA_DIR")
        .or_else(|| get_optional_env("DB_PATH"))
        .map_or_else(|| PathBuf::from("data"), PathBuf::from)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, using `default` when it is unset.
fn get_parsed_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn get_bool_or_default(key: &str, default: bool) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| parse_bool(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{value}'"),
        )),
    }
}

// Runtime configuration read from the environment (and `.env` via dotenv)

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_JWT_EXPIRE_HOURS: i64 = 720;
/// Longest accepted token lifetime, ten years
pub const MAX_JWT_EXPIRE_HOURS: i64 = 24 * 365 * 10;

/// Used only when JWT_SECRET is unset; never suitable for production
const DEV_JWT_SECRET: &str = "dev-secret-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Service settings
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expire_hours: i64,
    /// Adds `Secure` to the token cookie; enable behind HTTPS
    pub cookie_secure: bool,
}

impl Config {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, so tests can supply values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            database_url,
            database_max_connections: parsed(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
            jwt_secret,
            jwt_expire_hours: within(
                parsed(&lookup, "JWT_EXPIRE_HOURS", DEFAULT_JWT_EXPIRE_HOURS)?,
                "JWT_EXPIRE_HOURS",
                1,
                MAX_JWT_EXPIRE_HOURS,
            )?,
            cookie_secure: parsed(&lookup, "COOKIE_SECURE", false)?,
        })
    }
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn within(value: i64, name: &'static str, min: i64, max: i64) -> Result<i64, ConfigError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

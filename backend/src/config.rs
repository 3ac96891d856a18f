//! Runtime configuration read from the environment.
//!
//! Every setting except the token secret has a default; falling back to one is
//! logged so a misspelled variable is visible at startup.

use log::{info, warn};
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the surveys and responses collections.
    pub database: String,
    pub jwt_secret: String,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load("SURVEY_HOST", "127.0.0.1")?,
            port: try_load("SURVEY_PORT", "8080")?,
            database: try_load("SURVEY_DATABASE", "surveys.sqlite")?,
            jwt_secret: require("SURVEY_JWT_SECRET")?,
            json_limit: try_load("SURVEY_JSON_LIMIT", "10485760")?,
        })
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }
    })
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names so they can run in parallel.

    #[test]
    fn falls_back_to_default() {
        let port: u16 = try_load("SURVEY_TEST_UNSET_PORT", "9090").unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn rejects_unparsable_value() {
        env::set_var("SURVEY_TEST_BAD_PORT", "eighty");
        let result: Result<u16, _> = try_load("SURVEY_TEST_BAD_PORT", "8080");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "SURVEY_TEST_BAD_PORT",
                ..
            })
        ));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        env::set_var("SURVEY_TEST_BLANK_SECRET", "   ");
        assert!(matches!(
            require("SURVEY_TEST_BLANK_SECRET"),
            Err(ConfigError::Missing(_))
        ));
    }
}

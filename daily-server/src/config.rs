use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("JWT_SECRET must be set unless AUTH_DEV_MODE=true")]
    MissingSecret,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: Option<String>,
    pub auth_dev_mode: bool,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://daily_word.db?mode=rwc".to_string()),
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            auth_dev_mode: parse_or(&lookup, "AUTH_DEV_MODE", false)?,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", 16 * 1024)?,
        };

        if !config.auth_dev_mode && config.jwt_secret.is_none() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(config)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_in_dev_mode() {
        let config = Config::from_lookup(lookup_from(&[("AUTH_DEV_MODE", "true")])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.auth_dev_mode);
        assert_eq!(config.max_body_bytes, 16 * 1024);
    }

    #[test]
    fn test_secret_required_outside_dev_mode() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[])).unwrap_err(),
            ConfigError::MissingSecret
        );

        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret"), ("PORT", "9000")]))
            .unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("AUTH_DEV_MODE", "true"), ("PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }
}

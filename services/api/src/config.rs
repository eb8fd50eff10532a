//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::{Duration, Utc};
use lesson_plan_core::{Credential, DEFAULT_SCHOOL};
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Longest session lifetime accepted, ten years.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

/// Users available right after startup when `SEED_USERS` is not set.
const DEFAULT_SEED_USERS: &str = "admin:senha123,Rivaldo:manejo12";

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub school_name: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub seed_users: Vec<Credential>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            log_level: Level::INFO,
            school_name: DEFAULT_SCHOOL.to_string(),
            session_ttl_hours: 24,
            cookie_secure: false,
            seed_users: parse_seed_users(DEFAULT_SEED_USERS).unwrap_or_default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Plan and Session Settings ---
        let school_name =
            std::env::var("SCHOOL_NAME").unwrap_or_else(|_| DEFAULT_SCHOOL.to_string());

        let ttl_str = std::env::var("SESSION_TTL_HOURS").unwrap_or_else(|_| "24".to_string());
        let session_ttl_hours = parse_session_ttl(&ttl_str)
            .map_err(|e| ConfigError::InvalidValue("SESSION_TTL_HOURS".to_string(), e))?;

        let cookie_secure = match std::env::var("COOKIE_SECURE") {
            Ok(v) => parse_bool(&v).ok_or_else(|| {
                ConfigError::InvalidValue("COOKIE_SECURE".to_string(), v.clone())
            })?,
            Err(_) => false,
        };

        let seed_str =
            std::env::var("SEED_USERS").unwrap_or_else(|_| DEFAULT_SEED_USERS.to_string());
        let seed_users = parse_seed_users(&seed_str)
            .map_err(|e| ConfigError::InvalidValue("SEED_USERS".to_string(), e))?;

        Ok(Self {
            bind_address,
            log_level,
            school_name,
            session_ttl_hours,
            cookie_secure,
            seed_users,
        })
    }
}

/// Parses the session lifetime in hours. It must be positive, at most
/// `MAX_SESSION_TTL_HOURS`, and representable as an expiry from now.
pub fn parse_session_ttl(value: &str) -> Result<i64, String> {
    let hours = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a number of hours", value))?;
    if hours <= 0 || hours > MAX_SESSION_TTL_HOURS {
        return Err(format!(
            "{} is outside 1..={} hours",
            hours, MAX_SESSION_TTL_HOURS
        ));
    }
    Duration::try_hours(hours)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .map(|_| hours)
        .ok_or_else(|| format!("{} hours overflows the session expiry", hours))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses `user:pass` pairs separated by commas. An empty string means no
/// seeded users.
pub fn parse_seed_users(value: &str) -> Result<Vec<Credential>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((user, pass)) if !user.trim().is_empty() && !pass.trim().is_empty() => {
                Ok(Credential {
                    username: user.trim().to_string(),
                    password: pass.trim().to_string(),
                })
            }
            _ => Err(format!("'{}' is not a user:password pair", entry)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_users() {
        let users = parse_seed_users("admin:senha123, Rivaldo:manejo12").unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username, "Rivaldo");
        assert_eq!(users[1].password, "manejo12");
    }

    #[test]
    fn password_may_contain_colons() {
        let users = parse_seed_users("ana:a:b").unwrap();
        assert_eq!(users[0].password, "a:b");
    }

    #[test]
    fn rejects_malformed_seed_entries() {
        assert!(parse_seed_users("admin").is_err());
        assert!(parse_seed_users("admin:").is_err());
        assert!(parse_seed_users(":secret").is_err());
    }

    #[test]
    fn empty_seed_list_is_allowed() {
        assert!(parse_seed_users("").unwrap().is_empty());
    }

    #[test]
    fn default_config_seeds_the_two_fixed_users() {
        let config = Config::default();
        assert_eq!(config.seed_users.len(), 2);
        assert_eq!(config.bind_address.port(), 5000);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        assert_eq!(parse_session_ttl("24"), Ok(24));
        assert_eq!(parse_session_ttl(" 1 "), Ok(1));
        assert_eq!(
            parse_session_ttl(&MAX_SESSION_TTL_HOURS.to_string()),
            Ok(MAX_SESSION_TTL_HOURS)
        );
        assert!(parse_session_ttl("0").is_err());
        assert!(parse_session_ttl("-5").is_err());
        assert!(parse_session_ttl("abc").is_err());
    }

    #[test]
    fn huge_session_ttl_is_rejected_instead_of_overflowing() {
        assert!(parse_session_ttl("10000000000").is_err());
        assert!(parse_session_ttl(&i64::MAX.to_string()).is_err());
    }

    #[test]
    fn parses_boolean_flags() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

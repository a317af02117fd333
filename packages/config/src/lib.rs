// ABOUTME: Runtime configuration for the social auth workspace
// ABOUTME: Environment-driven settings for storage location and request context

pub mod constants;

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid connection count: {0}")]
    InvalidConnections(#[from] ParseIntError),
    #[error("Connection count must be at least 1")]
    ZeroConnections,
    #[error("Invalid boolean for {0}: {1}. Must be 'true' or 'false'")]
    InvalidBoolean(&'static str, String),
    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,
    #[error("Unable to determine home directory")]
    NoHomeDir,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub base_url: String,
    pub max_connections: u32,
    pub enable_wal: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(SOCIAL_AUTH_DATABASE_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => data_dir(lookup(HOME))?.join(DATABASE_FILE_NAME),
        };

        let base_url = lookup(SOCIAL_AUTH_BASE_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let max_connections = match lookup(SOCIAL_AUTH_DB_MAX_CONNECTIONS) {
            Some(raw) => raw.trim().parse::<u32>()?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }

        let enable_wal = match lookup(SOCIAL_AUTH_DB_WAL) {
            Some(raw) => parse_bool(SOCIAL_AUTH_DB_WAL, &raw)?,
            None => true,
        };

        let config = Config {
            database_path,
            base_url,
            max_connections,
            enable_wal,
        };
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

/// Get the path to the data directory (~/.social-auth)
fn data_dir(home: Option<String>) -> Result<PathBuf, ConfigError> {
    // HOME wins over dirs so tests can redirect it
    match home {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home).join(DATA_DIR_NAME)),
        _ => dirs::home_dir()
            .map(|home| home.join(DATA_DIR_NAME))
            .ok_or(ConfigError::NoHomeDir),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::InvalidBoolean(key, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = config_from(&[(HOME, "/home/tester")]).unwrap();

        assert_eq!(
            config.database_path,
            PathBuf::from("/home/tester/.social-auth/config.db")
        );
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.max_connections, 5);
        assert!(config.enable_wal);
    }

    #[test]
    fn test_config_with_all_custom() {
        let config = config_from(&[
            (SOCIAL_AUTH_DATABASE_PATH, "/var/lib/social/config.db"),
            (SOCIAL_AUTH_BASE_URL, "https://example.com/"),
            (SOCIAL_AUTH_DB_MAX_CONNECTIONS, "2"),
            (SOCIAL_AUTH_DB_WAL, "false"),
        ])
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/social/config.db"));
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.max_connections, 2);
        assert!(!config.enable_wal);
    }

    #[test]
    fn test_config_rejects_empty_base_url() {
        let result = config_from(&[(HOME, "/home/tester"), (SOCIAL_AUTH_BASE_URL, "  ")]);
        assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("many")]
    #[case("1.5")]
    fn test_invalid_connection_counts(#[case] raw: &str) {
        let result = config_from(&[(HOME, "/home/tester"), (SOCIAL_AUTH_DB_MAX_CONNECTIONS, raw)]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case("yes")]
    #[case("1")]
    #[case("TRUE")]
    fn test_invalid_wal_flag(#[case] raw: &str) {
        let result = config_from(&[(HOME, "/home/tester"), (SOCIAL_AUTH_DB_WAL, raw)]);
        assert!(matches!(result, Err(ConfigError::InvalidBoolean(_, _))));
    }
}

//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.optimizeql.toml` in current directory
//! 4. `~/.config/optimizeql/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [executor]
//! base_url = "http://localhost:8000/api/v1"
//! api_key = "..."               # or use OPTIMIZEQL_API_KEY env var
//! request_timeout_ms = 60000
//!
//! [compare]
//! row_limit = 100               # 1..=1000
//! statement_timeout_ms = 30000
//! dialect = "postgresql"        # generic, mysql, postgresql, sqlite, clickhouse
//!
//! [retry]
//! max_retries = 3
//! initial_delay_ms = 1000
//! max_delay_ms = 30000
//! backoff_factor = 2.0
//!
//! [log]
//! filter = "optimizeql=debug"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `OPTIMIZEQL_EXECUTOR_URL` | Execution service base URL |
//! | `OPTIMIZEQL_API_KEY` | Execution service API key |
//! | `OPTIMIZEQL_LOG` | Log filter directive |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    compare::{DEFAULT_ROW_LIMIT, DEFAULT_STATEMENT_TIMEOUT_MS, MAX_ROW_LIMIT, SqlDialect},
    error::{AppResult, config_error}
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub compare:  CompareConfig,
    #[serde(default)]
    pub retry:    RetryConfig,
    #[serde(default)]
    pub log:      LogConfig
}

/// Query execution service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub base_url:           String,
    pub api_key:            Option<String>,
    pub request_timeout_ms: u64
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url:           String::from("http://localhost:8000/api/v1"),
            api_key:            None,
            request_timeout_ms: 60_000
        }
    }
}

/// Result comparison settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub row_limit:            usize,
    pub statement_timeout_ms: u64,
    pub dialect:              SqlDialect
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            row_limit:            DEFAULT_ROW_LIMIT,
            statement_timeout_ms: DEFAULT_STATEMENT_TIMEOUT_MS,
            dialect:              SqlDialect::Generic
        }
    }
}

/// Retry configuration for execution service requests
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_retries:      u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms:     u64,
    pub backoff_factor:   f64
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries:      3,
            initial_delay_ms: 1000,
            max_delay_ms:     30000,
            backoff_factor:   2.0
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    pub filter: Option<String>
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.optimizeql.toml)
    /// 3. Config file in home directory (~/.config/optimizeql/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("optimizeql")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config replaces the home one
        let local_config = PathBuf::from(".optimizeql.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Ok(url) = env::var("OPTIMIZEQL_EXECUTOR_URL") {
            config.executor.base_url = url;
        }
        if let Ok(api_key) = env::var("OPTIMIZEQL_API_KEY") {
            config.executor.api_key = Some(api_key);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Example
    ///
    /// ```
    /// use optimizeql::config::Config;
    ///
    /// let config = Config::parse("[compare]\nrow_limit = 50").unwrap();
    /// assert_eq!(config.compare.row_limit, 50);
    /// assert_eq!(config.retry.max_retries, 3);
    /// ```
    pub fn parse(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        if !(1..=MAX_ROW_LIMIT).contains(&config.compare.row_limit) {
            return Err(config_error(format!(
                "compare.row_limit must be between 1 and {}, got {}",
                MAX_ROW_LIMIT,
                config.compare.row_limit
            )));
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::parse(&content)
    }
}

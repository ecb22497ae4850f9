//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_PER_USER_LIMIT, DEFAULT_QUEUE_CAPACITY, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_WORKER_SLOTS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub docker: DockerConfig,
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Docker configuration for sandbox containers
#[derive(Debug, Clone)]
pub struct DockerConfig {
    pub socket_path: String,
}

/// Judge engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of concurrent judge worker slots
    pub worker_slots: usize,
    /// Maximum submissions one user may have queued or running
    pub per_user_limit: usize,
    /// Bound on the admission queue
    pub queue_capacity: usize,
    /// Optional directory of problem fixture JSON files loaded at startup
    pub problems_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            docker: DockerConfig::from_env()?,
            engine: EngineConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DockerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            socket_path: env::var("DOCKER_SOCKET")
                .unwrap_or_else(|_| "/var/run/docker.sock".to_string()),
        })
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let parsed = Self {
            worker_slots: env::var("JUDGE_WORKER_SLOTS")
                .unwrap_or_else(|_| DEFAULT_WORKER_SLOTS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_WORKER_SLOTS".to_string()))?,
            per_user_limit: env::var("JUDGE_PER_USER_LIMIT")
                .unwrap_or_else(|_| DEFAULT_PER_USER_LIMIT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_PER_USER_LIMIT".to_string()))?,
            queue_capacity: env::var("JUDGE_QUEUE_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_QUEUE_CAPACITY.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_QUEUE_CAPACITY".to_string()))?,
            problems_path: env::var("PROBLEMS_PATH").ok().map(PathBuf::from),
        };

        if parsed.worker_slots == 0 {
            return Err(ConfigError::InvalidValue("JUDGE_WORKER_SLOTS".to_string()));
        }
        if parsed.per_user_limit == 0 {
            return Err(ConfigError::InvalidValue("JUDGE_PER_USER_LIMIT".to_string()));
        }

        Ok(parsed)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_slots: DEFAULT_WORKER_SLOTS,
            per_user_limit: DEFAULT_PER_USER_LIMIT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            problems_path: None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_config() {
        let engine = EngineConfig::default();
        assert_eq!(engine.worker_slots, 4);
        assert_eq!(engine.per_user_limit, 2);
        assert_eq!(engine.queue_capacity, 256);
        assert!(engine.problems_path.is_none());
    }
}

//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PLANNING_POKER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use planning_poker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod auth;
mod error;
mod redis;
mod server;
mod storage;
mod websocket;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use websocket::WebSocketConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development server backed by the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Room store backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Redis configuration (used when `storage.backend = redis`)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Per-connection WebSocket settings
    #[serde(default)]
    pub websocket: WebSocketConfig,

    /// Profile token verification
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLANNING_POKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLANNING_POKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLANNING_POKER__STORAGE__BACKEND=redis` -> `storage.backend = redis`
    /// - `PLANNING_POKER__REDIS__URL=...` -> `redis.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLANNING_POKER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Redis settings are only checked when the redis backend is selected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if self.storage.uses_redis() {
            self.redis.validate()?;
        }
        self.websocket.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PLANNING_POKER__SERVER__PORT",
        "PLANNING_POKER__SERVER__ENVIRONMENT",
        "PLANNING_POKER__STORAGE__BACKEND",
        "PLANNING_POKER__REDIS__URL",
        "PLANNING_POKER__WEBSOCKET__OUTBOUND_BUFFER",
        "PLANNING_POKER__AUTH__PROFILE_TOKEN_SECRET",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.websocket.outbound_buffer, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_redis_backend() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__STORAGE__BACKEND", "redis");
        env::set_var("PLANNING_POKER__REDIS__URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.storage.uses_redis());
        assert_eq!(config.redis.url, "redis://localhost:6379");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redis_backend_without_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__STORAGE__BACKEND", "redis");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_profile_secret_loaded() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__AUTH__PROFILE_TOKEN_SECRET", "local-secret");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.auth.profiles_enabled());
    }
}

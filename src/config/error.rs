//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Redis timeout must be between 1 and 60 seconds")]
    InvalidRedisTimeout,

    #[error("WebSocket outbound buffer must be between 1 and 4096 frames")]
    InvalidOutboundBuffer,

    #[error("Profile token secret must be at least 32 bytes in production")]
    ProfileSecretTooShort,
}

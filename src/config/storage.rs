//! Room storage backend selection

use serde::Deserialize;

/// Which `RoomStore` implementation the server wires up
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; rooms are lost on restart
    #[default]
    Memory,
    /// Redis documents, see `RedisConfig`
    Redis,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl StorageConfig {
    pub fn uses_redis(&self) -> bool {
        self.backend == StorageBackend::Redis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_memory() {
        assert_eq!(StorageConfig::default().backend, StorageBackend::Memory);
        assert!(!StorageConfig::default().uses_redis());
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let config: StorageConfig = serde_json::from_str(r#"{"backend":"redis"}"#).unwrap();
        assert!(config.uses_redis());
    }
}

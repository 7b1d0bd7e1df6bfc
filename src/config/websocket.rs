//! WebSocket session configuration

use serde::Deserialize;

use super::error::ValidationError;

/// WebSocket configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketConfig {
    /// Capacity of each connection's outbound queue, in frames.
    ///
    /// A recipient whose queue is full misses broadcasts until it drains.
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

impl WebSocketConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outbound_buffer == 0 || self.outbound_buffer > 4096 {
            return Err(ValidationError::InvalidOutboundBuffer);
        }
        Ok(())
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_websocket_defaults() {
        let config = WebSocketConfig::default();
        assert_eq!(config.outbound_buffer, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = WebSocketConfig { outbound_buffer: 0 };
        assert!(config.validate().is_err());
    }
}

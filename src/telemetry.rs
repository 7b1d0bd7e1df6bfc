//! Tracing subscriber initialization.
//!
//! One entry point, called once at startup. Output format follows the
//! deployment environment: human-readable in development, JSON elsewhere.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `fallback_filter`. Later calls are no-ops.
pub fn init(environment: Environment, fallback_filter: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let installed = match environment {
            Environment::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .try_init(),
            Environment::Staging | Environment::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(false)
                .try_init(),
        };

        if let Err(e) = installed {
            eprintln!("tracing subscriber already installed: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(Environment::Development, "info");
        init(Environment::Production, "debug");
        init(Environment::Development, "not a valid [filter");
    }
}

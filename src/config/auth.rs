//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (profile tokens on join)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify profile tokens.
    ///
    /// When unset, `profile_token` on join is ignored.
    pub profile_token_secret: Option<Secret<String>>,
}

impl AuthConfig {
    /// Whether profile-backed joins are enabled
    pub fn profiles_enabled(&self) -> bool {
        self.profile_token_secret
            .as_ref()
            .map(|s| !s.expose_secret().is_empty())
            .unwrap_or(false)
    }

    /// Validate authentication configuration
    ///
    /// In production, a configured secret must be long enough for HS256.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if let Some(secret) = &self.profile_token_secret {
            if *environment == Environment::Production
                && secret.expose_secret().len() < MIN_PRODUCTION_SECRET_LEN
            {
                return Err(ValidationError::ProfileSecretTooShort);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert!(!config.profiles_enabled());
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_empty_secret_disables_profiles() {
        let config = AuthConfig {
            profile_token_secret: Some(Secret::new(String::new())),
        };
        assert!(!config.profiles_enabled());
    }

    #[test]
    fn test_short_secret_allowed_in_development() {
        let config = AuthConfig {
            profile_token_secret: Some(Secret::new("dev".to_string())),
        };
        assert!(config.profiles_enabled());
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        let config = AuthConfig {
            profile_token_secret: Some(Secret::new("dev".to_string())),
        };
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::ProfileSecretTooShort)
        ));
    }
}

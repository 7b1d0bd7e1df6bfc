//! HS256 profile token adapter.
//!
//! Implements the `ProfileResolver` port by verifying a JWT signed with a
//! shared secret and reading the profile out of its claims.
//!
//! # Claims
//!
//! - **sub**: user id, becomes `Profile::uid`
//! - **name**: display name (may be empty)
//! - **email**, **picture**: optional
//! - **exp**: required, validated
//!
//! # Example
//!
//! ```ignore
//! use planning_poker::adapters::auth::JwtProfileResolver;
//! use planning_poker::ports::ProfileResolver;
//!
//! let resolver = JwtProfileResolver::new(secret);
//! let profile = resolver.resolve("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Profile};
use crate::ports::{ProfileError, ProfileResolver};

/// JWT claims carried by a profile token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileClaims {
    /// Subject - the user ID
    pub sub: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,
}

/// Verifies HS256 profile tokens.
pub struct JwtProfileResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtProfileResolver {
    /// Create a resolver for tokens signed with `secret`.
    pub fn new(secret: &Secret<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    fn verify(&self, token: &str) -> Result<ProfileClaims, ProfileError> {
        decode::<ProfileClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Profile token expired");
                        ProfileError::Expired
                    }
                    _ => {
                        tracing::warn!(error = %e, "Profile token rejected");
                        ProfileError::InvalidToken(e.to_string())
                    }
                }
            })
    }
}

#[async_trait]
impl ProfileResolver for JwtProfileResolver {
    async fn resolve(&self, token: &str) -> Result<Profile, ProfileError> {
        let claims = self.verify(token)?;

        let uid = MemberId::new(claims.sub)
            .map_err(|e| ProfileError::InvalidToken(e.to_string()))?;

        let mut profile = Profile::new(uid, claims.name);
        if let Some(email) = claims.email {
            profile = profile.with_email(email);
        }
        if let Some(picture) = claims.picture {
            profile = profile.with_picture(picture);
        }
        Ok(profile)
    }
}

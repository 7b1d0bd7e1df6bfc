//! Mock profile resolver for testing.
//!
//! Maps fixed tokens to profiles without any signature checks.
//!
//! # Example
//!
//! ```ignore
//! use planning_poker::adapters::auth::MockProfileResolver;
//!
//! let resolver = MockProfileResolver::new()
//!     .with_test_profile("token-ada", "user-1", "Ada");
//!
//! let profile = resolver.resolve("token-ada").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{MemberId, Profile};
use crate::ports::{ProfileError, ProfileResolver};

/// Mock profile resolver.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockProfileResolver {
    profiles: RwLock<HashMap<String, Profile>>,
    /// Optional error to return for all resolutions (for error testing)
    force_error: RwLock<Option<ProfileError>>,
}

impl MockProfileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token that resolves to `profile`.
    pub fn with_profile(self, token: impl Into<String>, profile: Profile) -> Self {
        if let Ok(mut profiles) = self.profiles.write() {
            profiles.insert(token.into(), profile);
        }
        self
    }

    /// Adds a token for a profile with the given id and name.
    ///
    /// # Panics
    ///
    /// Panics if `uid` is blank.
    pub fn with_test_profile(
        self,
        token: impl Into<String>,
        uid: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let uid = MemberId::new(uid).expect("test profile uid must not be blank");
        self.with_profile(token, Profile::new(uid, name))
    }

    /// Forces all resolutions to return the specified error.
    pub fn with_error(self, error: ProfileError) -> Self {
        if let Ok(mut forced) = self.force_error.write() {
            *forced = Some(error);
        }
        self
    }
}

#[async_trait]
impl ProfileResolver for MockProfileResolver {
    async fn resolve(&self, token: &str) -> Result<Profile, ProfileError> {
        if let Some(err) = self
            .force_error
            .read()
            .map_err(|_| ProfileError::Unavailable("mock lock poisoned".to_string()))?
            .clone()
        {
            return Err(err);
        }

        self.profiles
            .read()
            .map_err(|_| ProfileError::Unavailable("mock lock poisoned".to_string()))?
            .get(token)
            .cloned()
            .ok_or_else(|| ProfileError::InvalidToken("unknown token".to_string()))
    }
}

//! ProfileResolver port - turns a profile token into a display identity.
//!
//! Token verification belongs to an external identity service. The room
//! engine only asks "who is this and what should we show for them".

use async_trait::async_trait;

use crate::domain::foundation::Profile;

/// Errors that can occur while resolving a profile token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Token failed verification (bad signature, malformed, wrong algorithm).
    #[error("Invalid profile token: {0}")]
    InvalidToken(String),

    /// Token verified but is past its expiry.
    #[error("Profile token expired")]
    Expired,

    /// Token belongs to someone other than the connected caller.
    #[error("Profile subject does not match caller")]
    SubjectMismatch,

    /// The identity service could not be reached.
    #[error("Profile service unavailable: {0}")]
    Unavailable(String),
}

/// Resolves profile tokens to profiles.
///
/// # Contract
///
/// Implementations must:
/// - Return the profile whose `uid` is the token's subject
/// - Return `Expired` for expired tokens and `InvalidToken` for anything
///   that fails verification
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Profile, ProfileError>;
}

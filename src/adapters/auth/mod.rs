//! Authentication adapters.
//!
//! Implementations of the `ProfileResolver` port:
//!
//! - `jwt_profile` - HS256 profile tokens verified with a shared secret
//! - `mock` - Test implementation that doesn't verify anything

mod jwt_profile;
mod mock;

pub use jwt_profile::{JwtProfileResolver, ProfileClaims};
pub use mock::MockProfileResolver;

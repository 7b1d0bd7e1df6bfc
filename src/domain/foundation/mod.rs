//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the planning poker domain.

mod errors;
mod ids;
mod profile;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MemberId, RoomId};
pub use profile::Profile;
pub use timestamp::Timestamp;

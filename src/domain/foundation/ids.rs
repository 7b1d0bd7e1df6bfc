//! Strongly-typed identifier value objects.
//!
//! Room and member ids are opaque strings: rooms are keyed by a generated
//! `xxxxx-<uuid>` token, members by either an authenticated user id or a
//! generated guest id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Timestamp, ValidationError};

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random prefix on generated ids.
const RANDOM_PREFIX_LEN: usize = 5;

/// Unique identifier for a planning poker room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a RoomId from an existing token.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the token is blank
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("room_id"));
        }
        Ok(Self(id))
    }

    /// Generates a fresh room id: five random characters and a v4 UUID.
    pub fn generate() -> Self {
        Self(format!("{}-{}", random_prefix(), Uuid::new_v4()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a room participant.
///
/// Either the subject of an authenticated profile or a guest id issued by
/// [`MemberId::new_guest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a MemberId from an existing identifier.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the identifier is blank
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("member_id"));
        }
        Ok(Self(id))
    }

    /// Issues a guest id: random prefix, v4 UUID and a compact timestamp.
    pub fn new_guest(now: Timestamp) -> Self {
        Self(format!(
            "{}-{}-{}",
            random_prefix(),
            Uuid::new_v4(),
            now.as_datetime().format("%Y%m%d%H%M%S")
        ))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Short lowercase alphanumeric prefix drawn from a v4 UUID's random bytes.
fn random_prefix() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(RANDOM_PREFIX_LEN)
        .map(|b| ID_CHARSET[*b as usize % ID_CHARSET.len()] as char)
        .collect()
}

//! Member entity - a participant bound to a room.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};

/// A participant in a room.
///
/// `estimated_value` is an opaque card token; the empty string means the
/// member has not estimated in the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub(super) id: MemberId,
    pub(super) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) picture: Option<String>,
    #[serde(default)]
    pub(super) estimated_value: String,
    pub(super) last_active_at: Timestamp,
}

impl Member {
    /// Creates a member who has not estimated yet.
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        picture: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            picture,
            estimated_value: String::new(),
            last_active_at: now,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    pub fn estimated_value(&self) -> &str {
        &self.estimated_value
    }

    /// Returns true once the member has picked a card this round.
    pub fn has_estimated(&self) -> bool {
        !self.estimated_value.is_empty()
    }

    pub fn last_active_at(&self) -> &Timestamp {
        &self.last_active_at
    }
}

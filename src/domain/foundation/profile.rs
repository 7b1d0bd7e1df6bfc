//! Resolved user profile.

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Display identity resolved from a profile token.
///
/// Produced by a `ProfileResolver`; the room only keeps `name` and
/// `picture` on the member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub uid: MemberId,
    pub name: String,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl Profile {
    pub fn new(uid: MemberId, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            email: None,
            picture: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}

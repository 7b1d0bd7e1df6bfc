//! SignInGuestHandler - issues identifiers for anonymous participants.

use crate::domain::foundation::{MemberId, Timestamp};

/// Handler for guest sign-in.
///
/// Guests have no account; the id is the only credential they get and is
/// passed back as `uid` when opening a room socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignInGuestHandler;

impl SignInGuestHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self) -> MemberId {
        let id = MemberId::new_guest(Timestamp::now());
        tracing::debug!(member_id = %id, "Guest signed in");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issues_distinct_ids() {
        let handler = SignInGuestHandler::new();
        assert_ne!(handler.handle(), handler.handle());
    }

    #[test]
    fn id_has_prefix_uuid_and_stamp() {
        let id = SignInGuestHandler::new().handle();
        let stamp = id.as_str().rsplit('-').next().unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}

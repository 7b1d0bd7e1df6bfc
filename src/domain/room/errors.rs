//! Room-specific error types.

use thiserror::Error;

use crate::domain::foundation::MemberId;

/// Rejections produced by the room state machine.
///
/// A rejected transition leaves the room untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Member {0} has already joined this room")]
    AlreadyMember(MemberId),

    #[error("Member {0} is not in this room")]
    MemberNotFound(MemberId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_member_in_the_message() {
        let err = RoomError::MemberNotFound(MemberId::new("u9").unwrap());
        assert_eq!(err.to_string(), "Member u9 is not in this room");
    }
}

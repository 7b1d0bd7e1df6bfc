//! RoomActionHandler - applies one client action to a room.
//!
//! Every action follows the same cycle: fetch the latest snapshot, apply one
//! transition to a private copy, persist the touched fields. The returned
//! snapshot is what gets broadcast.
//!
//! No lock is held between the fetch and the write. Two actions on the same
//! room may race and the later write wins.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{MemberId, RoomId, Timestamp};
use crate::domain::room::{Member, Room, RoomError, RoomPatch};
use crate::ports::{ProfileError, ProfileResolver, RoomStore, RoomStoreError};

/// A decoded client action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomAction {
    /// Take a seat. `profile_token` upgrades the display identity when a
    /// resolver is configured.
    JoinRoom {
        name: String,
        profile_token: Option<String>,
    },
    /// Pick (or clear, with `""`) a card.
    UpdateEstimate { value: String },
    RevealCards,
    ResetRoom,
    /// Heartbeat.
    UpdateActiveUser,
}

/// Discriminant of `RoomAction`, used for error mapping and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    JoinRoom,
    UpdateEstimatedValue,
    RevealCards,
    ResetRoom,
    UpdateActiveUser,
}

impl ActionKind {
    /// Wire token of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::JoinRoom => "JOIN_ROOM",
            ActionKind::UpdateEstimatedValue => "UPDATE_ESTIMATED_VALUE",
            ActionKind::RevealCards => "REVEAL_CARDS",
            ActionKind::ResetRoom => "RESET_ROOM",
            ActionKind::UpdateActiveUser => "UPDATE_ACTIVE_USER",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RoomAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            RoomAction::JoinRoom { .. } => ActionKind::JoinRoom,
            RoomAction::UpdateEstimate { .. } => ActionKind::UpdateEstimatedValue,
            RoomAction::RevealCards => ActionKind::RevealCards,
            RoomAction::ResetRoom => ActionKind::ResetRoom,
            RoomAction::UpdateActiveUser => ActionKind::UpdateActiveUser,
        }
    }
}

/// Why an action was not applied.
#[derive(Debug, thiserror::Error)]
pub enum RoomActionError {
    #[error(transparent)]
    Domain(#[from] RoomError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Storage(#[from] RoomStoreError),
}

/// Handler for in-room actions.
pub struct RoomActionHandler {
    store: Arc<dyn RoomStore>,
    profiles: Option<Arc<dyn ProfileResolver>>,
}

impl RoomActionHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self {
            store,
            profiles: None,
        }
    }

    /// Enable profile-backed joins.
    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileResolver>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Apply `action` on behalf of `member_id` and persist it.
    ///
    /// Returns the post-transition snapshot on success. On failure nothing
    /// was written.
    pub async fn handle(
        &self,
        room_id: &RoomId,
        member_id: &MemberId,
        action: RoomAction,
    ) -> Result<Room, RoomActionError> {
        let now = Timestamp::now();

        // 1. Build the joining member before touching the store
        let joining = match &action {
            RoomAction::JoinRoom {
                name,
                profile_token,
            } => Some(
                self.joining_member(member_id, name, profile_token.as_deref(), now)
                    .await?,
            ),
            _ => None,
        };

        // 2. Load latest snapshot
        let mut room = self.store.get(room_id).await?;

        // 3. Apply transition
        let patch = match action {
            RoomAction::JoinRoom { .. } => {
                if let Some(member) = joining {
                    room.join(member, now)?;
                }
                RoomPatch::members_of(&room)
            }
            RoomAction::UpdateEstimate { value } => {
                room.update_estimate(member_id, value, now)?;
                RoomPatch::estimates_of(&room)
            }
            RoomAction::RevealCards => {
                room.reveal(member_id, now)?;
                RoomPatch::round_of(&room)
            }
            RoomAction::ResetRoom => {
                room.reset(now);
                RoomPatch::round_of(&room)
            }
            RoomAction::UpdateActiveUser => {
                room.touch(member_id, now)?;
                RoomPatch::members_of(&room)
            }
        };

        // 4. Persist touched fields
        self.store.update_fields(room_id, patch).await?;

        Ok(room)
    }

    async fn joining_member(
        &self,
        member_id: &MemberId,
        name: &str,
        profile_token: Option<&str>,
        now: Timestamp,
    ) -> Result<Member, ProfileError> {
        let (Some(token), Some(profiles)) = (profile_token, self.profiles.as_ref()) else {
            return Ok(Member::new(member_id.clone(), name, None, now));
        };

        let profile = profiles.resolve(token).await?;
        if &profile.uid != member_id {
            return Err(ProfileError::SubjectMismatch);
        }

        let display_name = if profile.name.is_empty() {
            name.to_string()
        } else {
            profile.name
        };
        Ok(Member::new(member_id.clone(), display_name, profile.picture, now))
    }
}
